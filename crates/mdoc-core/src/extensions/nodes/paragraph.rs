//! `paragraph` ↔ paragraph

use crate::context::ConversionContext;
use crate::document::{Attrs, DocNode};
use crate::error::ConvertError;
use crate::registry::{Extension, Subject, TransformEntry};
use crate::schema::{NodeSpec, Schema};
use mdoc_mdast::Node as MdNode;

pub fn extension() -> Extension {
    Extension::node(
        NodeSpec::block("paragraph"),
        TransformEntry::new("paragraph")
            .with_to_markdown(to_markdown)
            .with_from_markdown(from_markdown),
    )
}

// An empty paragraph has no markdown form
fn to_markdown(_: Subject<'_>, children: Vec<MdNode>) -> Vec<MdNode> {
    if children.is_empty() {
        return Vec::new();
    }
    vec![MdNode::paragraph(children)]
}

fn from_markdown(
    _: &MdNode,
    schema: &Schema,
    children: Vec<DocNode>,
    _: &ConversionContext,
) -> Result<Vec<DocNode>, ConvertError> {
    Ok(vec![schema.node("paragraph", Attrs::new(), children)?])
}
