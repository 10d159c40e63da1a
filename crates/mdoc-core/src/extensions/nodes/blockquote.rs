//! `blockquote` ↔ blockquote

use crate::context::ConversionContext;
use crate::document::{Attrs, DocNode};
use crate::error::ConvertError;
use crate::extensions::wrap_inline;
use crate::registry::{Extension, Subject, TransformEntry};
use crate::schema::{NodeSpec, Schema};
use mdoc_mdast::Node as MdNode;

pub fn extension() -> Extension {
    Extension::node(
        NodeSpec::block("blockquote"),
        TransformEntry::new("blockquote")
            .with_to_markdown(to_markdown)
            .with_from_markdown(from_markdown),
    )
}

fn to_markdown(_: Subject<'_>, children: Vec<MdNode>) -> Vec<MdNode> {
    vec![MdNode::blockquote(children)]
}

fn from_markdown(
    _: &MdNode,
    schema: &Schema,
    children: Vec<DocNode>,
    _: &ConversionContext,
) -> Result<Vec<DocNode>, ConvertError> {
    let content = wrap_inline(schema, children)?;
    Ok(vec![schema.node("blockquote", Attrs::new(), content)?])
}
