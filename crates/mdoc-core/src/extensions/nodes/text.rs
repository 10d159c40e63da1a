//! `text` ↔ text

use crate::context::ConversionContext;
use crate::document::DocNode;
use crate::error::ConvertError;
use crate::registry::{Extension, Subject, TransformEntry};
use crate::schema::{NodeSpec, Schema};
use mdoc_mdast::Node as MdNode;

pub fn extension() -> Extension {
    Extension::node(
        NodeSpec::inline("text"),
        TransformEntry::new("text")
            .with_to_markdown(to_markdown)
            .with_from_markdown(from_markdown),
    )
}

fn to_markdown(subject: Subject<'_>, _: Vec<MdNode>) -> Vec<MdNode> {
    match subject.node().and_then(|n| n.text.as_deref()) {
        Some(text) if !text.is_empty() => vec![MdNode::text(text)],
        _ => Vec::new(),
    }
}

fn from_markdown(
    node: &MdNode,
    schema: &Schema,
    _: Vec<DocNode>,
    _: &ConversionContext,
) -> Result<Vec<DocNode>, ConvertError> {
    match node {
        MdNode::Text(t) if !t.value.is_empty() => Ok(vec![schema.text(t.value.clone(), vec![])?]),
        _ => Ok(Vec::new()),
    }
}
