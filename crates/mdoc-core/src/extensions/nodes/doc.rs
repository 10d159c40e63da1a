//! `doc` ↔ root

use crate::context::ConversionContext;
use crate::document::{Attrs, DocNode};
use crate::error::ConvertError;
use crate::registry::{Extension, Subject, TransformEntry};
use crate::schema::{NodeSpec, Schema};
use mdoc_mdast::{Node as MdNode, Root};

pub fn extension() -> Extension {
    Extension::node(
        NodeSpec::block("doc"),
        TransformEntry::new("doc")
            .with_alias("root")
            .with_to_markdown(to_markdown)
            .with_from_markdown(from_markdown),
    )
}

fn to_markdown(_: Subject<'_>, children: Vec<MdNode>) -> Vec<MdNode> {
    vec![MdNode::Root(Root::new(children))]
}

fn from_markdown(
    _: &MdNode,
    schema: &Schema,
    children: Vec<DocNode>,
    _: &ConversionContext,
) -> Result<Vec<DocNode>, ConvertError> {
    Ok(vec![schema.node("doc", Attrs::new(), children)?])
}
