//! mdoc-core: conversion between markdown and editor document trees
//!
//! This crate provides:
//! - The document tree and its schema
//! - A registry of per-type conversion hooks, extensible without touching
//!   the dispatch code
//! - The default extension set (headings, lists, tables, callouts, marks, ...)
//! - Normalization passes: text fixups, front matter, alert blockquotes
//! - A pulldown-cmark based markdown parser producing mdast
//!
//! ## Example
//!
//! ```rust
//! use mdoc_core::{Registry, document_to_markdown, markdown_to_document};
//!
//! let registry = Registry::default();
//! let result = markdown_to_document("# Hello\n\nWorld\n", &registry).unwrap();
//! assert_eq!(result.document.content[0].node_type, "heading");
//!
//! let md = document_to_markdown(&result.document, &registry, None);
//! assert_eq!(md, "# Hello\n\nWorld\n");
//! ```

pub mod context;
pub mod convert;
pub mod document;
pub mod error;
pub mod extensions;
pub mod parser;
pub mod passes;
pub mod pipeline;
pub mod registry;
pub mod schema;
pub mod serializer;

pub use context::{ConversionContext, Frame};
pub use convert::Converter;
pub use document::{Attrs, DocNode, Mark};
pub use error::{ConvertError, Error, Result};
pub use mdoc_mdast::{Node as MdNode, Root as MdRoot};
pub use pipeline::{
    ParseOptions, ParseResult, ParsedMarkdown, document_to_markdown, markdown_to_document,
    markdown_to_document_with_options, parse_markdown, parse_markdown_with_options,
};
pub use registry::{Extension, FromMarkdown, Registry, Subject, ToMarkdown, TransformEntry};
pub use schema::{AttrSpec, MarkSpec, NodeGroup, NodeSpec, Schema};
pub use serializer::{serialize, serializer_options};
