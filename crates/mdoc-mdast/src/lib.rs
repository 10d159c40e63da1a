//! mdoc-mdast: mdast types and markdown writer for mdoc
//!
//! This crate provides:
//! - mdast (Markdown Abstract Syntax Tree) types (subset, plus callouts)
//! - Serialization to markdown with a per-kind override table
//!
//! ## Example
//!
//! ```rust
//! use mdoc_mdast::{Node, Root, mdast_to_markdown, WriterOptions};
//!
//! let doc = Root::new(vec![
//!     Node::heading(1, vec![Node::text("Hello")]),
//!     Node::paragraph(vec![Node::text("World")]),
//! ]);
//!
//! let md = mdast_to_markdown(&doc, &WriterOptions::default());
//! assert_eq!(md, "# Hello\n\nWorld\n");
//! ```

pub mod mdast;
pub mod writer;

pub use mdast::{
    Align, Blockquote, Callout, CalloutKind, Code, Delete, Emphasis, Heading, Html, Image,
    InlineCode, Link, List, ListItem, Node, Paragraph, Root, Strong, Table, TableCell, TableRow,
    Text, Yaml,
};
pub use writer::{Handler, Scope, WriterOptions, mdast_to_markdown};
