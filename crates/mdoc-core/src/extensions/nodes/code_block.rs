//! `codeBlock` {language} ↔ code

use crate::context::ConversionContext;
use crate::document::DocNode;
use crate::error::ConvertError;
use crate::extensions::attrs;
use crate::registry::{Extension, Subject, TransformEntry};
use crate::schema::{NodeSpec, Schema};
use mdoc_mdast::{Code, Node as MdNode};
use serde_json::Value;

pub fn extension() -> Extension {
    Extension::node(
        NodeSpec::block("codeBlock").attr("language", Value::Null),
        TransformEntry::new("codeBlock")
            .with_alias("code")
            .with_to_markdown(to_markdown)
            .with_from_markdown(from_markdown),
    )
}

fn to_markdown(subject: Subject<'_>, _: Vec<MdNode>) -> Vec<MdNode> {
    let value = subject.node().map(DocNode::text_content).unwrap_or_default();
    vec![MdNode::Code(Code {
        lang: subject
            .attr_str("language")
            .filter(|l| !l.is_empty())
            .map(str::to_string),
        meta: None,
        value,
    })]
}

fn from_markdown(
    node: &MdNode,
    schema: &Schema,
    _: Vec<DocNode>,
    _: &ConversionContext,
) -> Result<Vec<DocNode>, ConvertError> {
    let MdNode::Code(code) = node else {
        return Ok(Vec::new());
    };
    let language = code.lang.clone().map_or(Value::Null, Value::from);
    let content = if code.value.is_empty() {
        Vec::new()
    } else {
        vec![schema.text(code.value.clone(), vec![])?]
    };
    Ok(vec![schema.node(
        "codeBlock",
        attrs([("language", language)]),
        content,
    )?])
}
