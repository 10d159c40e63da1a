//! `strike` ↔ delete

use super::apply_mark;
use crate::context::ConversionContext;
use crate::document::DocNode;
use crate::error::ConvertError;
use crate::registry::{Extension, Subject, TransformEntry};
use crate::schema::{MarkSpec, Schema};
use mdoc_mdast::Node as MdNode;

pub fn extension() -> Extension {
    Extension::mark(
        MarkSpec::new("strike"),
        TransformEntry::new("strike")
            .with_alias("delete")
            .with_to_markdown(to_markdown)
            .with_from_markdown(from_markdown),
    )
}

fn to_markdown(_: Subject<'_>, children: Vec<MdNode>) -> Vec<MdNode> {
    if children.is_empty() {
        return Vec::new();
    }
    vec![MdNode::delete(children)]
}

fn from_markdown(
    _: &MdNode,
    schema: &Schema,
    children: Vec<DocNode>,
    ctx: &ConversionContext,
) -> Result<Vec<DocNode>, ConvertError> {
    apply_mark("strike", schema, children, ctx)
}
