//! `bulletList`, `orderedList` {start} and `taskList` ↔ list
//!
//! The three document list types share the mdast `list` kind. Converting
//! from mdast picks the type from the list's `ordered` flag and its items.

use crate::context::ConversionContext;
use crate::document::{Attrs, DocNode};
use crate::error::ConvertError;
use crate::extensions::attrs;
use crate::registry::{Extension, Subject, TransformEntry};
use crate::schema::{NodeSpec, Schema};
use mdoc_mdast::{List, Node as MdNode};
use serde_json::{Value, json};

pub fn extensions() -> Vec<Extension> {
    vec![
        Extension::node(
            NodeSpec::block("bulletList"),
            TransformEntry::new("bulletList")
                .with_alias("list")
                .with_to_markdown(bullet_to_markdown)
                .with_from_markdown(from_markdown),
        ),
        Extension::node(
            NodeSpec::block("orderedList").attr("start", json!(1)),
            TransformEntry::new("orderedList")
                .with_alias("list")
                .with_to_markdown(ordered_to_markdown),
        ),
        Extension::node(
            NodeSpec::block("taskList"),
            TransformEntry::new("taskList")
                .with_alias("list")
                .with_to_markdown(bullet_to_markdown),
        ),
    ]
}

fn bullet_to_markdown(_: Subject<'_>, children: Vec<MdNode>) -> Vec<MdNode> {
    vec![MdNode::List(List {
        ordered: false,
        start: None,
        spread: false,
        children,
    })]
}

fn ordered_to_markdown(subject: Subject<'_>, children: Vec<MdNode>) -> Vec<MdNode> {
    let start = subject
        .attr("start")
        .and_then(Value::as_u64)
        .and_then(|s| u32::try_from(s).ok())
        .unwrap_or(1);
    vec![MdNode::ordered_list_from(start, children)]
}

fn from_markdown(
    node: &MdNode,
    schema: &Schema,
    children: Vec<DocNode>,
    _: &ConversionContext,
) -> Result<Vec<DocNode>, ConvertError> {
    let MdNode::List(list) = node else {
        return Ok(children);
    };

    if list.ordered {
        let start = list.start.unwrap_or(1);
        return Ok(vec![schema.node(
            "orderedList",
            attrs([("start", json!(start))]),
            children,
        )?]);
    }

    if !children.iter().any(|c| c.node_type == "taskItem") {
        return Ok(vec![schema.node("bulletList", Attrs::new(), children)?]);
    }

    // A single checked item turns the whole list into a task list
    let items = children
        .into_iter()
        .map(|item| {
            if item.node_type == "listItem" {
                schema.node("taskItem", attrs([("checked", json!(false))]), item.content)
            } else {
                Ok(item)
            }
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(vec![schema.node("taskList", Attrs::new(), items)?])
}
