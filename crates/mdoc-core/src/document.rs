//! Document tree types
//!
//! The typed tree used by the rich editing surface. Nodes serialize to the
//! editor's JSON shape: `{"type": "...", "attrs": {...}, "content": [...]}`,
//! with `marks` and `text` on text nodes.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Attribute map of a node or mark
pub type Attrs = Map<String, Value>;

/// A node in the document tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocNode {
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub attrs: Attrs,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub content: Vec<DocNode>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub marks: Vec<Mark>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// An inline mark attached to a node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mark {
    #[serde(rename = "type")]
    pub mark_type: String,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub attrs: Attrs,
}

impl DocNode {
    /// Parse a document tree from its JSON form
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn is_text(&self) -> bool {
        self.text.is_some()
    }

    pub fn attr(&self, name: &str) -> Option<&Value> {
        self.attrs.get(name).filter(|v| !v.is_null())
    }

    pub fn attr_str(&self, name: &str) -> Option<&str> {
        self.attr(name).and_then(Value::as_str)
    }

    pub fn attr_u64(&self, name: &str) -> Option<u64> {
        self.attr(name).and_then(Value::as_u64)
    }

    pub fn attr_bool(&self, name: &str) -> Option<bool> {
        self.attr(name).and_then(Value::as_bool)
    }

    pub fn has_mark(&self, mark_type: &str) -> bool {
        self.marks.iter().any(|m| m.mark_type == mark_type)
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        if let Some(text) = &self.text {
            out.push_str(text);
        }
        for child in &self.content {
            child.collect_text(out);
        }
    }
}

impl Mark {
    pub fn attr_str(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).and_then(Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_shape() {
        let json = json!({
            "type": "paragraph",
            "content": [
                { "type": "text", "text": "plain" },
                { "type": "text", "text": "bold", "marks": [{ "type": "bold" }] }
            ]
        });
        let node: DocNode = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(node.node_type, "paragraph");
        assert!(node.attrs.is_empty());
        assert_eq!(node.content.len(), 2);
        assert!(node.content[1].has_mark("bold"));
        assert_eq!(serde_json::to_value(&node).unwrap(), json);
    }

    #[test]
    fn test_attr_accessors() {
        let node = DocNode::from_json(
            r#"{"type":"heading","attrs":{"level":3,"id":null,"open":true,"name":"x"}}"#,
        )
        .unwrap();
        assert_eq!(node.attr_u64("level"), Some(3));
        assert_eq!(node.attr("id"), None);
        assert_eq!(node.attr_bool("open"), Some(true));
        assert_eq!(node.attr_str("name"), Some("x"));
    }

    #[test]
    fn test_text_content() {
        let node = DocNode::from_json(
            r#"{"type":"codeBlock","content":[{"type":"text","text":"a"},{"type":"text","text":"b"}]}"#,
        )
        .unwrap();
        assert_eq!(node.text_content(), "ab");
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let err = DocNode::from_json("{").unwrap_err();
        assert!(matches!(err, crate::Error::Parse(_)));
    }
}
