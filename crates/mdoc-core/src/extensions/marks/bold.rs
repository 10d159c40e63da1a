//! `bold` ↔ strong

use super::apply_mark;
use crate::context::ConversionContext;
use crate::document::DocNode;
use crate::error::ConvertError;
use crate::registry::{Extension, Subject, TransformEntry};
use crate::schema::{MarkSpec, Schema};
use mdoc_mdast::Node as MdNode;

pub fn extension() -> Extension {
    Extension::mark(
        MarkSpec::new("bold"),
        TransformEntry::new("bold")
            .with_alias("strong")
            .with_to_markdown(to_markdown)
            .with_from_markdown(from_markdown),
    )
}

fn to_markdown(_: Subject<'_>, children: Vec<MdNode>) -> Vec<MdNode> {
    if children.is_empty() {
        return Vec::new();
    }
    vec![MdNode::strong(children)]
}

fn from_markdown(
    _: &MdNode,
    schema: &Schema,
    children: Vec<DocNode>,
    ctx: &ConversionContext,
) -> Result<Vec<DocNode>, ConvertError> {
    apply_mark("bold", schema, children, ctx)
}
