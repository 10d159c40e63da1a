//! `heading` {level} ↔ heading

use crate::context::ConversionContext;
use crate::document::DocNode;
use crate::error::ConvertError;
use crate::extensions::{attrs, merge_doc_texts, merge_md_texts};
use crate::registry::{Extension, Subject, TransformEntry};
use crate::schema::{NodeSpec, Schema};
use mdoc_mdast::Node as MdNode;
use serde_json::{Value, json};

pub fn extension() -> Extension {
    Extension::node(
        NodeSpec::block("heading").attr("level", json!(1)),
        TransformEntry::new("heading")
            .with_to_markdown(to_markdown)
            .with_from_markdown(from_markdown),
    )
}

fn clamp_level(level: u64) -> u8 {
    level.clamp(1, 6) as u8
}

fn to_markdown(subject: Subject<'_>, children: Vec<MdNode>) -> Vec<MdNode> {
    let level = subject.attr("level").and_then(Value::as_u64).unwrap_or(1);
    vec![MdNode::heading(clamp_level(level), fold_breaks(children))]
}

/// Replace breaks with spaces at any depth
fn fold_breaks(nodes: Vec<MdNode>) -> Vec<MdNode> {
    let nodes = nodes
        .into_iter()
        .map(|node| match node {
            MdNode::Break => MdNode::text(" "),
            mut other => {
                if let Some(children) = other.children_mut() {
                    *children = fold_breaks(std::mem::take(children));
                }
                other
            }
        })
        .collect();
    merge_md_texts(nodes)
}

fn from_markdown(
    node: &MdNode,
    schema: &Schema,
    children: Vec<DocNode>,
    _: &ConversionContext,
) -> Result<Vec<DocNode>, ConvertError> {
    let depth = match node {
        MdNode::Heading(h) => h.depth,
        _ => 1,
    };
    let level = clamp_level(u64::from(depth));
    Ok(vec![schema.node(
        "heading",
        attrs([("level", json!(level))]),
        merge_doc_texts(children),
    )?])
}
