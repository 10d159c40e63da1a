//! `image` {src, alt, title} ↔ image

use crate::context::ConversionContext;
use crate::document::DocNode;
use crate::error::ConvertError;
use crate::extensions::attrs;
use crate::registry::{Extension, Subject, TransformEntry};
use crate::schema::{NodeSpec, Schema};
use mdoc_mdast::{Image, Node as MdNode};
use serde_json::Value;

pub fn extension() -> Extension {
    Extension::node(
        NodeSpec::inline("image")
            .attr("src", Value::Null)
            .attr("alt", Value::Null)
            .attr("title", Value::Null),
        TransformEntry::new("image")
            .with_to_markdown(to_markdown)
            .with_from_markdown(from_markdown),
    )
}

fn to_markdown(subject: Subject<'_>, _: Vec<MdNode>) -> Vec<MdNode> {
    vec![MdNode::Image(Image {
        url: subject.attr_str("src").unwrap_or_default().to_string(),
        title: subject.attr_str("title").map(str::to_string),
        alt: subject.attr_str("alt").unwrap_or_default().to_string(),
    })]
}

fn from_markdown(
    node: &MdNode,
    schema: &Schema,
    _: Vec<DocNode>,
    _: &ConversionContext,
) -> Result<Vec<DocNode>, ConvertError> {
    let MdNode::Image(image) = node else {
        return Ok(Vec::new());
    };
    let alt = if image.alt.is_empty() {
        Value::Null
    } else {
        Value::from(image.alt.clone())
    };
    Ok(vec![schema.node(
        "image",
        attrs([
            ("src", Value::from(image.url.clone())),
            ("alt", alt),
            ("title", image.title.clone().map_or(Value::Null, Value::from)),
        ]),
        Vec::new(),
    )?])
}
