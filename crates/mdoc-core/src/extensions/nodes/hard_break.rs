//! `hardBreak` ↔ break
//!
//! ATX headings cannot hold a line break, so inside a heading a break is
//! folded into a single space of the heading's text.

use crate::context::ConversionContext;
use crate::document::{Attrs, DocNode};
use crate::error::ConvertError;
use crate::registry::{Extension, Subject, TransformEntry};
use crate::schema::{NodeSpec, Schema};
use mdoc_mdast::Node as MdNode;

pub fn extension() -> Extension {
    Extension::node(
        NodeSpec::inline("hardBreak"),
        TransformEntry::new("hardBreak")
            .with_alias("break")
            .with_to_markdown(to_markdown)
            .with_from_markdown(from_markdown),
    )
}

fn to_markdown(_: Subject<'_>, _: Vec<MdNode>) -> Vec<MdNode> {
    vec![MdNode::line_break()]
}

fn from_markdown(
    _: &MdNode,
    schema: &Schema,
    _: Vec<DocNode>,
    ctx: &ConversionContext,
) -> Result<Vec<DocNode>, ConvertError> {
    if ctx.heading_level().is_some() {
        return Ok(vec![schema.text(" ", vec![])?]);
    }
    Ok(vec![schema.node("hardBreak", Attrs::new(), Vec::new())?])
}
