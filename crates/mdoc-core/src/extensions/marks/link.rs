//! `link` {href, title} ↔ link

use crate::context::ConversionContext;
use crate::document::DocNode;
use crate::error::ConvertError;
use crate::extensions::{attrs, mark_inline};
use crate::registry::{Extension, Subject, TransformEntry};
use crate::schema::{MarkSpec, Schema};
use mdoc_mdast::{Link, Node as MdNode};
use serde_json::Value;

pub fn extension() -> Extension {
    Extension::mark(
        MarkSpec::new("link")
            .attr("href", Value::Null)
            .attr("title", Value::Null),
        TransformEntry::new("link")
            .with_to_markdown(to_markdown)
            .with_from_markdown(from_markdown),
    )
}

fn to_markdown(mark: Subject<'_>, children: Vec<MdNode>) -> Vec<MdNode> {
    if children.is_empty() {
        return Vec::new();
    }
    vec![MdNode::Link(Link {
        url: mark.attr_str("href").unwrap_or_default().to_string(),
        title: mark.attr_str("title").map(str::to_string),
        children,
    })]
}

fn from_markdown(
    node: &MdNode,
    schema: &Schema,
    children: Vec<DocNode>,
    _: &ConversionContext,
) -> Result<Vec<DocNode>, ConvertError> {
    let MdNode::Link(link) = node else {
        return Ok(children);
    };
    let mark = schema.mark(
        "link",
        attrs([
            ("href", Value::from(link.url.clone())),
            ("title", link.title.clone().map_or(Value::Null, Value::from)),
        ]),
    )?;
    Ok(mark_inline(schema, children, &mark))
}
