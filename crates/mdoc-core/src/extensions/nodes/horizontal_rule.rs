//! `horizontalRule` ↔ thematicBreak

use crate::context::ConversionContext;
use crate::document::{Attrs, DocNode};
use crate::error::ConvertError;
use crate::registry::{Extension, Subject, TransformEntry};
use crate::schema::{NodeSpec, Schema};
use mdoc_mdast::Node as MdNode;

pub fn extension() -> Extension {
    Extension::node(
        NodeSpec::block("horizontalRule"),
        TransformEntry::new("horizontalRule")
            .with_alias("thematicBreak")
            .with_to_markdown(to_markdown)
            .with_from_markdown(from_markdown),
    )
}

fn to_markdown(_: Subject<'_>, _: Vec<MdNode>) -> Vec<MdNode> {
    vec![MdNode::thematic_break()]
}

fn from_markdown(
    _: &MdNode,
    schema: &Schema,
    _: Vec<DocNode>,
    _: &ConversionContext,
) -> Result<Vec<DocNode>, ConvertError> {
    Ok(vec![schema.node("horizontalRule", Attrs::new(), Vec::new())?])
}
