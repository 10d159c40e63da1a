//! Default extension set
//!
//! One module per markdown construct. Each declares its document type and
//! supplies the conversion hooks for both directions.

pub mod marks;
pub mod nodes;

use crate::document::{Attrs, DocNode, Mark};
use crate::error::ConvertError;
use crate::registry::Extension;
use crate::schema::Schema;
use mdoc_mdast::Node as MdNode;
use serde_json::Value;

/// The default extension set, marks first in rank order
pub fn defaults() -> Vec<Extension> {
    let mut extensions = marks::extensions();
    extensions.extend(nodes::extensions());
    extensions
}

/// Build an attribute map, skipping null values
pub(crate) fn attrs<'a>(pairs: impl IntoIterator<Item = (&'a str, Value)>) -> Attrs {
    pairs
        .into_iter()
        .filter(|(_, v)| !v.is_null())
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

/// Add a mark to every inline node in `children`
pub(crate) fn mark_inline(schema: &Schema, children: Vec<DocNode>, mark: &Mark) -> Vec<DocNode> {
    children
        .into_iter()
        .map(|mut child| {
            if schema.is_inline(&child) {
                schema.add_mark(&mut child.marks, mark.clone());
            }
            child
        })
        .collect()
}

/// Plain text of converted mdast nodes
pub(crate) fn plain_text(nodes: &[MdNode]) -> String {
    let mut out = String::new();
    collect_text(nodes, &mut out);
    out
}

fn collect_text(nodes: &[MdNode], out: &mut String) {
    for node in nodes {
        match node {
            MdNode::Text(t) => out.push_str(&t.value),
            MdNode::InlineCode(c) => out.push_str(&c.value),
            MdNode::Break => out.push('\n'),
            other => collect_text(other.children(), out),
        }
    }
}

/// Merge adjacent mdast text nodes
pub(crate) fn merge_md_texts(nodes: Vec<MdNode>) -> Vec<MdNode> {
    let mut out: Vec<MdNode> = Vec::with_capacity(nodes.len());
    for node in nodes {
        if let (Some(MdNode::Text(prev)), MdNode::Text(next)) = (out.last_mut(), &node) {
            prev.value.push_str(&next.value);
            continue;
        }
        out.push(node);
    }
    out
}

/// Merge adjacent document text nodes carrying the same marks
pub(crate) fn merge_doc_texts(nodes: Vec<DocNode>) -> Vec<DocNode> {
    let mut out: Vec<DocNode> = Vec::with_capacity(nodes.len());
    for node in nodes {
        if let Some(prev) = out.last_mut()
            && prev.marks == node.marks
            && let (Some(text), Some(next)) = (prev.text.as_mut(), node.text.as_deref())
        {
            text.push_str(next);
            continue;
        }
        out.push(node);
    }
    out
}

/// Wrap runs of inline nodes into paragraphs
pub(crate) fn wrap_inline(
    schema: &Schema,
    children: Vec<DocNode>,
) -> Result<Vec<DocNode>, ConvertError> {
    let mut out = Vec::with_capacity(children.len());
    let mut run = Vec::new();
    for child in children {
        if schema.is_inline(&child) {
            run.push(child);
            continue;
        }
        if !run.is_empty() {
            out.push(schema.node("paragraph", Attrs::new(), std::mem::take(&mut run))?);
        }
        out.push(child);
    }
    if !run.is_empty() {
        out.push(schema.node("paragraph", Attrs::new(), run)?);
    }
    Ok(out)
}
