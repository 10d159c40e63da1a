//! End-to-end conversion between markdown text and document trees
//!
//! Markdown → document: fixups → parse → front matter → callouts → tree
//! conversion. Document → markdown: tree conversion → callouts → serializer.

use crate::convert::Converter;
use crate::document::DocNode;
use crate::passes::{apply_fixups, detect_callouts, extract_front_matter};
use crate::registry::Registry;
use crate::serializer::serialize;
use crate::{Result, parser};
use mdoc_mdast::Root;
use serde::{Deserialize, Serialize};

/// Options for turning markdown text into mdast
#[derive(Debug, Clone, Copy)]
pub struct ParseOptions {
    /// Run the pre-parse text fixups
    pub fixups: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self { fixups: true }
    }
}

/// Parsed and normalized mdast with its front matter split out
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedMarkdown {
    pub root: Root,
    /// Raw front matter, empty when the text has none
    pub front_matter: String,
}

/// A document tree with the front matter of its source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseResult {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub front_matter: String,
    pub document: DocNode,
}

impl ParseResult {
    /// Parse from the JSON form written by [`ParseResult`]'s `Serialize`
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Parse markdown into normalized mdast
pub fn parse_markdown(text: &str) -> ParsedMarkdown {
    parse_markdown_with_options(text, ParseOptions::default())
}

/// Parse markdown into normalized mdast with options
pub fn parse_markdown_with_options(text: &str, options: ParseOptions) -> ParsedMarkdown {
    let root = if options.fixups {
        parser::parse(&apply_fixups(text))
    } else {
        parser::parse(text)
    };
    let (root, front_matter) = extract_front_matter(root);
    let root = detect_callouts(root);
    ParsedMarkdown { root, front_matter }
}

/// Convert markdown text into a document tree
pub fn markdown_to_document(text: &str, registry: &Registry) -> Result<ParseResult> {
    markdown_to_document_with_options(text, registry, ParseOptions::default())
}

/// Convert markdown text into a document tree with options
pub fn markdown_to_document_with_options(
    text: &str,
    registry: &Registry,
    options: ParseOptions,
) -> Result<ParseResult> {
    let parsed = parse_markdown_with_options(text, options);
    let document = Converter::new(registry).to_document(parsed.root)?;
    Ok(ParseResult {
        front_matter: parsed.front_matter,
        document,
    })
}

/// Convert a document tree to markdown text
pub fn document_to_markdown(
    doc: &DocNode,
    registry: &Registry,
    front_matter: Option<&str>,
) -> String {
    let root = Converter::new(registry).to_markdown_ast(doc);
    let root = detect_callouts(root);
    serialize(&root, front_matter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_markdown_extracts_front_matter() {
        let parsed = parse_markdown("---\ntitle: x\n---\n\n# Heading\n");
        assert_eq!(parsed.front_matter, "title: x");
        assert_eq!(parsed.root.children.len(), 1);
    }

    #[test]
    fn test_fixups_can_be_disabled() {
        let text = "- \\[ ] item\n";
        let with = parse_markdown(text);
        let without = parse_markdown_with_options(text, ParseOptions { fixups: false });
        assert_ne!(with.root, without.root);
    }

    #[test]
    fn test_parse_result_json_shape() {
        let registry = Registry::default();
        let result = markdown_to_document("hi\n", &registry).unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("frontMatter").is_none());
        assert_eq!(json["document"]["type"], "doc");

        let back = ParseResult::from_json(&json.to_string()).unwrap();
        assert_eq!(back, result);
    }
}
