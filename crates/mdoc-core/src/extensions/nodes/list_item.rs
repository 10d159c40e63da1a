//! `listItem` and `taskItem` {checked} ↔ listItem

use crate::context::ConversionContext;
use crate::document::{Attrs, DocNode};
use crate::error::ConvertError;
use crate::extensions::{attrs, wrap_inline};
use crate::registry::{Extension, Subject, TransformEntry};
use crate::schema::{NodeSpec, Schema};
use mdoc_mdast::{ListItem, Node as MdNode};
use serde_json::{Value, json};

pub fn extensions() -> Vec<Extension> {
    vec![
        Extension::node(
            NodeSpec::block("listItem"),
            TransformEntry::new("listItem")
                .with_to_markdown(to_markdown)
                .with_from_markdown(from_markdown),
        ),
        Extension::node(
            NodeSpec::block("taskItem").attr("checked", json!(false)),
            TransformEntry::new("taskItem")
                .with_alias("listItem")
                .with_to_markdown(to_markdown),
        ),
    ]
}

fn to_markdown(subject: Subject<'_>, children: Vec<MdNode>) -> Vec<MdNode> {
    let checked = match subject.type_name() {
        "taskItem" => Some(subject.attr("checked").and_then(Value::as_bool).unwrap_or(false)),
        _ => None,
    };
    vec![MdNode::ListItem(ListItem {
        spread: false,
        checked,
        children,
    })]
}

fn from_markdown(
    node: &MdNode,
    schema: &Schema,
    children: Vec<DocNode>,
    _: &ConversionContext,
) -> Result<Vec<DocNode>, ConvertError> {
    let mut content = wrap_inline(schema, children)?;
    if content.is_empty() {
        content.push(schema.node("paragraph", Attrs::new(), Vec::new())?);
    }

    match node {
        MdNode::ListItem(ListItem {
            checked: Some(checked),
            ..
        }) => Ok(vec![schema.node(
            "taskItem",
            attrs([("checked", json!(checked))]),
            content,
        )?]),
        _ => Ok(vec![schema.node("listItem", Attrs::new(), content)?]),
    }
}
