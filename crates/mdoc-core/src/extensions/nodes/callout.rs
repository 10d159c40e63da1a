//! `callout` {kind} ↔ callout

use crate::context::ConversionContext;
use crate::document::DocNode;
use crate::error::ConvertError;
use crate::extensions::{attrs, wrap_inline};
use crate::registry::{Extension, Subject, TransformEntry};
use crate::schema::{NodeSpec, Schema};
use mdoc_mdast::{CalloutKind, Node as MdNode};
use serde_json::{Value, json};

pub fn extension() -> Extension {
    Extension::node(
        NodeSpec::block("callout").attr("kind", json!("info")),
        TransformEntry::new("callout")
            .with_to_markdown(to_markdown)
            .with_from_markdown(from_markdown),
    )
}

fn to_markdown(subject: Subject<'_>, children: Vec<MdNode>) -> Vec<MdNode> {
    let kind = subject
        .attr_str("kind")
        .and_then(CalloutKind::from_name)
        .unwrap_or(CalloutKind::Info);
    vec![MdNode::callout(kind, children)]
}

fn from_markdown(
    node: &MdNode,
    schema: &Schema,
    children: Vec<DocNode>,
    _: &ConversionContext,
) -> Result<Vec<DocNode>, ConvertError> {
    let kind = match node {
        MdNode::Callout(c) => Value::from(c.kind.as_str()),
        _ => Value::Null,
    };
    let content = wrap_inline(schema, children)?;
    Ok(vec![schema.node("callout", attrs([("kind", kind)]), content)?])
}
