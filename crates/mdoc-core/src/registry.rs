//! Capability extension mechanism
//!
//! Each node or mark type contributes a [`TransformEntry`]: up to two plain
//! function hooks, one per conversion direction, keyed by the type name.
//! Contributions for the same name are merged, so an extension can add one
//! direction to a type another extension declared.

use crate::context::ConversionContext;
use crate::document::{DocNode, Mark};
use crate::error::ConvertError;
use crate::schema::{MarkSpec, NodeSpec, Schema};
use mdoc_mdast::Node as MdNode;
use serde_json::Value;
use std::collections::HashMap;

/// The document node or mark handed to a [`ToMarkdown`] hook
#[derive(Debug, Clone, Copy)]
pub enum Subject<'a> {
    Node(&'a DocNode),
    Mark(&'a Mark),
}

impl<'a> Subject<'a> {
    pub fn type_name(&self) -> &'a str {
        match self {
            Subject::Node(node) => &node.node_type,
            Subject::Mark(mark) => &mark.mark_type,
        }
    }

    pub fn attr(&self, name: &str) -> Option<&'a Value> {
        let attrs = match self {
            Subject::Node(node) => &node.attrs,
            Subject::Mark(mark) => &mark.attrs,
        };
        attrs.get(name).filter(|v| !v.is_null())
    }

    pub fn attr_str(&self, name: &str) -> Option<&'a str> {
        self.attr(name).and_then(Value::as_str)
    }

    /// The underlying document node, `None` for marks
    pub fn node(&self) -> Option<&'a DocNode> {
        match self {
            Subject::Node(node) => Some(node),
            Subject::Mark(_) => None,
        }
    }
}

/// Document → mdast hook: the subject and its already converted children
pub type ToMarkdown = fn(Subject<'_>, Vec<MdNode>) -> Vec<MdNode>;

/// mdast → document hook: the mdast node, the schema, its already converted
/// children and the position of the node in the tree
pub type FromMarkdown = fn(
    &MdNode,
    &Schema,
    Vec<DocNode>,
    &ConversionContext,
) -> Result<Vec<DocNode>, ConvertError>;

/// Conversion hooks for one node or mark type
#[derive(Debug, Clone)]
pub struct TransformEntry {
    pub name: String,
    /// mdast kind handled by this type when it differs from the name
    pub markdown_kind: Option<String>,
    pub to_markdown: Option<ToMarkdown>,
    pub from_markdown: Option<FromMarkdown>,
}

impl TransformEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            markdown_kind: None,
            to_markdown: None,
            from_markdown: None,
        }
    }

    #[must_use]
    pub fn with_alias(mut self, markdown_kind: impl Into<String>) -> Self {
        self.markdown_kind = Some(markdown_kind.into());
        self
    }

    #[must_use]
    pub fn with_to_markdown(mut self, hook: ToMarkdown) -> Self {
        self.to_markdown = Some(hook);
        self
    }

    #[must_use]
    pub fn with_from_markdown(mut self, hook: FromMarkdown) -> Self {
        self.from_markdown = Some(hook);
        self
    }

    /// The mdast kind this entry converts from
    pub fn markdown_kind(&self) -> &str {
        self.markdown_kind.as_deref().unwrap_or(&self.name)
    }

    /// Union with a later contribution; absent parts keep their old value
    fn merge(&mut self, other: TransformEntry) {
        if other.markdown_kind.is_some() {
            self.markdown_kind = other.markdown_kind;
        }
        if other.to_markdown.is_some() {
            self.to_markdown = other.to_markdown;
        }
        if other.from_markdown.is_some() {
            self.from_markdown = other.from_markdown;
        }
    }
}

/// Structural base of an extension
#[derive(Debug, Clone)]
pub enum Structure {
    Node(NodeSpec),
    Mark(MarkSpec),
}

/// A structural declaration bundled with its conversion hooks
#[derive(Debug, Clone)]
pub struct Extension {
    pub structure: Option<Structure>,
    pub transform: TransformEntry,
}

impl Extension {
    /// A new node type with its hooks
    pub fn node(spec: NodeSpec, transform: TransformEntry) -> Self {
        Self {
            structure: Some(Structure::Node(spec)),
            transform,
        }
    }

    /// A new mark type with its hooks
    pub fn mark(spec: MarkSpec, transform: TransformEntry) -> Self {
        Self {
            structure: Some(Structure::Mark(spec)),
            transform,
        }
    }

    /// Hooks for a type declared elsewhere
    pub fn extend(transform: TransformEntry) -> Self {
        Self {
            structure: None,
            transform,
        }
    }
}

/// Schema plus the transform table used by both conversion directions.
///
/// Built once, then shared read-only.
#[derive(Debug, Clone)]
pub struct Registry {
    schema: Schema,
    transforms: HashMap<String, TransformEntry>,
    /// mdast kind → name of the entry converting it to the document tree
    by_markdown_kind: HashMap<String, String>,
}

impl Registry {
    /// A registry with no types at all
    pub fn empty() -> Self {
        Self {
            schema: Schema::new(),
            transforms: HashMap::new(),
            by_markdown_kind: HashMap::new(),
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Contribute a transform entry, merging with an existing one of the
    /// same name.
    pub fn register(&mut self, entry: TransformEntry) {
        let name = entry.name.clone();
        match self.transforms.get_mut(&name) {
            Some(existing) => existing.merge(entry),
            None => {
                self.transforms.insert(name.clone(), entry);
            }
        }

        self.by_markdown_kind.retain(|_, owner| *owner != name);
        if let Some(entry) = self.transforms.get(&name)
            && entry.from_markdown.is_some()
        {
            let kind = entry.markdown_kind().to_string();
            if let Some(previous) = self.by_markdown_kind.insert(kind.clone(), name.clone()) {
                tracing::debug!(kind = %kind, previous = %previous, name = %name, "mdast kind handler replaced");
            }
        }
    }

    /// Declare the extension's structure, unless already declared, and
    /// merge its hooks.
    pub fn install(&mut self, extension: Extension) {
        let declared = match extension.structure {
            Some(Structure::Node(spec)) => self.schema.declare_node(spec),
            Some(Structure::Mark(spec)) => self.schema.declare_mark(spec),
            None => true,
        };
        if !declared {
            tracing::debug!(
                name = %extension.transform.name,
                "Type already declared, keeping original structure"
            );
        }
        self.register(extension.transform);
    }

    /// Entry for a document type name
    pub fn transform(&self, name: &str) -> Option<&TransformEntry> {
        self.transforms.get(name)
    }

    /// Entry converting the given mdast kind to the document tree
    pub fn for_markdown_kind(&self, kind: &str) -> Option<&TransformEntry> {
        self.by_markdown_kind
            .get(kind)
            .and_then(|name| self.transforms.get(name))
    }
}

impl Default for Registry {
    /// Registry with the default extension set installed
    fn default() -> Self {
        let mut registry = Self::empty();
        for extension in crate::extensions::defaults() {
            registry.install(extension);
        }
        registry
    }
}
