//! `code` ↔ inlineCode
//!
//! Inline code is a leaf in mdast, so the mark becomes a single text node
//! carrying the mark, and back again the marked text is concatenated.

use crate::context::ConversionContext;
use crate::document::{Attrs, DocNode};
use crate::error::ConvertError;
use crate::extensions::plain_text;
use crate::registry::{Extension, Subject, TransformEntry};
use crate::schema::{MarkSpec, Schema};
use mdoc_mdast::Node as MdNode;

pub fn extension() -> Extension {
    Extension::mark(
        MarkSpec::new("code"),
        TransformEntry::new("code")
            .with_alias("inlineCode")
            .with_to_markdown(to_markdown)
            .with_from_markdown(from_markdown),
    )
}

fn to_markdown(_: Subject<'_>, children: Vec<MdNode>) -> Vec<MdNode> {
    let value = plain_text(&children);
    if value.is_empty() {
        return Vec::new();
    }
    vec![MdNode::inline_code(value)]
}

fn from_markdown(
    node: &MdNode,
    schema: &Schema,
    _: Vec<DocNode>,
    _: &ConversionContext,
) -> Result<Vec<DocNode>, ConvertError> {
    let MdNode::InlineCode(code) = node else {
        return Ok(Vec::new());
    };
    if code.value.is_empty() {
        return Ok(Vec::new());
    }
    let mark = schema.mark("code", Attrs::new())?;
    Ok(vec![schema.text(code.value.clone(), vec![mark])?])
}
