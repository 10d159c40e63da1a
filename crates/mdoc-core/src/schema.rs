//! Structural declarations of node and mark types
//!
//! The schema only knows shapes: which types exist, whether a node is block
//! or inline, and which attributes it carries. Conversion concerns live in
//! the [registry](crate::registry).

use crate::document::{Attrs, DocNode, Mark};
use crate::error::ConvertError;
use serde_json::Value;
use std::collections::HashMap;

/// Whether a node type is block content or inline content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeGroup {
    Block,
    Inline,
}

/// A declared attribute and its default value
#[derive(Debug, Clone, PartialEq)]
pub struct AttrSpec {
    pub name: String,
    pub default: Value,
}

/// Structural declaration of a node type
#[derive(Debug, Clone, PartialEq)]
pub struct NodeSpec {
    pub name: String,
    pub group: NodeGroup,
    pub attrs: Vec<AttrSpec>,
}

impl NodeSpec {
    pub fn block(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            group: NodeGroup::Block,
            attrs: Vec::new(),
        }
    }

    pub fn inline(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            group: NodeGroup::Inline,
            attrs: Vec::new(),
        }
    }

    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, default: Value) -> Self {
        self.attrs.push(AttrSpec {
            name: name.into(),
            default,
        });
        self
    }
}

/// Structural declaration of a mark type
#[derive(Debug, Clone, PartialEq)]
pub struct MarkSpec {
    pub name: String,
    pub attrs: Vec<AttrSpec>,
}

impl MarkSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: Vec::new(),
        }
    }

    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, default: Value) -> Self {
        self.attrs.push(AttrSpec {
            name: name.into(),
            default,
        });
        self
    }
}

/// The set of declared node and mark types.
///
/// Marks are ranked by declaration order; a node's marks are kept sorted by
/// rank so that equal mark sets compare equal.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    nodes: HashMap<String, NodeSpec>,
    marks: Vec<MarkSpec>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a node type. An existing declaration is kept; returns whether
    /// the spec was added.
    pub fn declare_node(&mut self, spec: NodeSpec) -> bool {
        if self.nodes.contains_key(&spec.name) {
            return false;
        }
        self.nodes.insert(spec.name.clone(), spec);
        true
    }

    /// Declare a mark type. An existing declaration is kept; returns whether
    /// the spec was added.
    pub fn declare_mark(&mut self, spec: MarkSpec) -> bool {
        if self.mark_rank(&spec.name).is_some() {
            return false;
        }
        self.marks.push(spec);
        true
    }

    pub fn node_spec(&self, name: &str) -> Option<&NodeSpec> {
        self.nodes.get(name)
    }

    pub fn mark_spec(&self, name: &str) -> Option<&MarkSpec> {
        self.marks.iter().find(|m| m.name == name)
    }

    pub fn mark_rank(&self, name: &str) -> Option<usize> {
        self.marks.iter().position(|m| m.name == name)
    }

    /// Whether a document node is inline content
    pub fn is_inline(&self, node: &DocNode) -> bool {
        node.is_text()
            || self
                .node_spec(&node.node_type)
                .is_some_and(|spec| spec.group == NodeGroup::Inline)
    }

    /// Build a node of a declared type, filling attribute defaults.
    ///
    /// Attributes the type does not declare are dropped.
    pub fn node(
        &self,
        name: &str,
        attrs: Attrs,
        content: Vec<DocNode>,
    ) -> Result<DocNode, ConvertError> {
        let spec = self
            .node_spec(name)
            .ok_or_else(|| ConvertError::UnknownNodeType(name.to_string()))?;
        Ok(DocNode {
            node_type: spec.name.clone(),
            attrs: fill_attrs(&spec.attrs, attrs),
            content,
            marks: Vec::new(),
            text: None,
        })
    }

    /// Build a text node carrying the given marks
    pub fn text(&self, text: impl Into<String>, marks: Vec<Mark>) -> Result<DocNode, ConvertError> {
        if self.node_spec("text").is_none() {
            return Err(ConvertError::UnknownNodeType("text".to_string()));
        }
        let mut node = DocNode {
            node_type: "text".to_string(),
            attrs: Attrs::new(),
            content: Vec::new(),
            marks: Vec::new(),
            text: Some(text.into()),
        };
        for mark in marks {
            self.add_mark(&mut node.marks, mark);
        }
        Ok(node)
    }

    /// Build a mark of a declared type, filling attribute defaults
    pub fn mark(&self, name: &str, attrs: Attrs) -> Result<Mark, ConvertError> {
        let spec = self
            .mark_spec(name)
            .ok_or_else(|| ConvertError::UnknownMarkType(name.to_string()))?;
        Ok(Mark {
            mark_type: spec.name.clone(),
            attrs: fill_attrs(&spec.attrs, attrs),
        })
    }

    /// Add a mark to a set, replacing a mark of the same type and keeping
    /// the set in rank order.
    pub fn add_mark(&self, marks: &mut Vec<Mark>, mark: Mark) {
        if let Some(existing) = marks.iter_mut().find(|m| m.mark_type == mark.mark_type) {
            *existing = mark;
            return;
        }
        let rank = self.mark_rank(&mark.mark_type).unwrap_or(usize::MAX);
        let at = marks
            .iter()
            .position(|m| self.mark_rank(&m.mark_type).unwrap_or(usize::MAX) > rank)
            .unwrap_or(marks.len());
        marks.insert(at, mark);
    }

    /// The marks of a node in rank order; undeclared marks sort last
    pub fn ordered_marks<'a>(&self, node: &'a DocNode) -> Vec<&'a Mark> {
        let mut marks: Vec<&Mark> = node.marks.iter().collect();
        marks.sort_by_key(|m| self.mark_rank(&m.mark_type).unwrap_or(usize::MAX));
        marks
    }
}

fn fill_attrs(specs: &[AttrSpec], mut given: Attrs) -> Attrs {
    specs
        .iter()
        .map(|spec| {
            let value = given
                .remove(&spec.name)
                .unwrap_or_else(|| spec.default.clone());
            (spec.name.clone(), value)
        })
        .collect()
}
