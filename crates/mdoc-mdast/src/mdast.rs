//! mdast (Markdown Abstract Syntax Tree) types
//!
//! The subset of mdast nodes exchanged with the document tree, plus the
//! `callout` extension produced by alert blockquote detection.
//! Reference: https://github.com/syntax-tree/mdast

use serde::{Deserialize, Serialize};

/// Root node of an mdast document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Root {
    pub children: Vec<Node>,
}

/// An mdast node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Node {
    Root(Root),

    // Block nodes
    Heading(Heading),
    Paragraph(Paragraph),
    ThematicBreak,
    Blockquote(Blockquote),
    Callout(Callout),
    List(List),
    ListItem(ListItem),
    Code(Code),
    Table(Table),
    TableRow(TableRow),
    TableCell(TableCell),
    Html(Html),

    // Front matter
    Yaml(Yaml),

    // Inline nodes
    Text(Text),
    Emphasis(Emphasis),
    Strong(Strong),
    Delete(Delete),
    InlineCode(InlineCode),
    Break,
    Link(Link),
    Image(Image),
}

/// Heading node (# to ######)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heading {
    pub depth: u8,
    pub children: Vec<Node>,
}

/// Paragraph node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    pub children: Vec<Node>,
}

/// Blockquote node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blockquote {
    pub children: Vec<Node>,
}

/// Blockquote retyped by a leading alert marker such as `[!WARNING]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Callout {
    pub kind: CalloutKind,
    pub children: Vec<Node>,
}

/// Alert kind of a callout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalloutKind {
    Warning,
    Info,
}

impl CalloutKind {
    /// Name used for the kind in serialized trees
    pub fn as_str(self) -> &'static str {
        match self {
            CalloutKind::Warning => "warning",
            CalloutKind::Info => "info",
        }
    }

    /// The literal marker written at the start of the callout
    pub fn marker(self) -> &'static str {
        match self {
            CalloutKind::Warning => "[!WARNING]",
            CalloutKind::Info => "[!NOTE]",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "warning" => Some(CalloutKind::Warning),
            "info" => Some(CalloutKind::Info),
            _ => None,
        }
    }
}

/// List node (ordered or unordered)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct List {
    pub ordered: bool,
    pub start: Option<u32>,
    pub spread: bool,
    pub children: Vec<Node>,
}

/// List item node
///
/// `checked` is `Some` for task list items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    pub spread: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checked: Option<bool>,
    pub children: Vec<Node>,
}

/// Code block node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Code {
    pub lang: Option<String>,
    pub meta: Option<String>,
    pub value: String,
}

/// Table node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub align: Vec<Option<Align>>,
    pub children: Vec<Node>,
}

/// Table row node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    pub children: Vec<Node>,
}

/// Table cell node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableCell {
    pub children: Vec<Node>,
}

/// Table alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Center,
    Right,
}

/// Raw HTML node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Html {
    pub value: String,
}

/// YAML front matter block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Yaml {
    pub value: String,
}

/// Text node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    pub value: String,
}

/// Emphasis node (*text*)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Emphasis {
    pub children: Vec<Node>,
}

/// Strong node (**text**)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Strong {
    pub children: Vec<Node>,
}

/// Strikethrough node (~~text~~)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Delete {
    pub children: Vec<Node>,
}

/// Inline code node (`code`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InlineCode {
    pub value: String,
}

/// Link node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub url: String,
    pub title: Option<String>,
    pub children: Vec<Node>,
}

/// Image node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    pub title: Option<String>,
    pub alt: String,
}

impl Node {
    /// The mdast `type` discriminator of this node
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Root(_) => "root",
            Node::Heading(_) => "heading",
            Node::Paragraph(_) => "paragraph",
            Node::ThematicBreak => "thematicBreak",
            Node::Blockquote(_) => "blockquote",
            Node::Callout(_) => "callout",
            Node::List(_) => "list",
            Node::ListItem(_) => "listItem",
            Node::Code(_) => "code",
            Node::Table(_) => "table",
            Node::TableRow(_) => "tableRow",
            Node::TableCell(_) => "tableCell",
            Node::Html(_) => "html",
            Node::Yaml(_) => "yaml",
            Node::Text(_) => "text",
            Node::Emphasis(_) => "emphasis",
            Node::Strong(_) => "strong",
            Node::Delete(_) => "delete",
            Node::InlineCode(_) => "inlineCode",
            Node::Break => "break",
            Node::Link(_) => "link",
            Node::Image(_) => "image",
        }
    }

    /// Child nodes, empty for leaf kinds
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Root(n) => &n.children,
            Node::Heading(n) => &n.children,
            Node::Paragraph(n) => &n.children,
            Node::Blockquote(n) => &n.children,
            Node::Callout(n) => &n.children,
            Node::List(n) => &n.children,
            Node::ListItem(n) => &n.children,
            Node::Table(n) => &n.children,
            Node::TableRow(n) => &n.children,
            Node::TableCell(n) => &n.children,
            Node::Emphasis(n) => &n.children,
            Node::Strong(n) => &n.children,
            Node::Delete(n) => &n.children,
            Node::Link(n) => &n.children,
            Node::ThematicBreak
            | Node::Code(_)
            | Node::Html(_)
            | Node::Yaml(_)
            | Node::Text(_)
            | Node::InlineCode(_)
            | Node::Break
            | Node::Image(_) => &[],
        }
    }

    /// Mutable access to child nodes; `None` for leaf kinds
    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Root(n) => Some(&mut n.children),
            Node::Heading(n) => Some(&mut n.children),
            Node::Paragraph(n) => Some(&mut n.children),
            Node::Blockquote(n) => Some(&mut n.children),
            Node::Callout(n) => Some(&mut n.children),
            Node::List(n) => Some(&mut n.children),
            Node::ListItem(n) => Some(&mut n.children),
            Node::Table(n) => Some(&mut n.children),
            Node::TableRow(n) => Some(&mut n.children),
            Node::TableCell(n) => Some(&mut n.children),
            Node::Emphasis(n) => Some(&mut n.children),
            Node::Strong(n) => Some(&mut n.children),
            Node::Delete(n) => Some(&mut n.children),
            Node::Link(n) => Some(&mut n.children),
            _ => None,
        }
    }

    /// Whether this node is phrasing (inline) content
    pub fn is_inline(&self) -> bool {
        matches!(
            self,
            Node::Text(_)
                | Node::Emphasis(_)
                | Node::Strong(_)
                | Node::Delete(_)
                | Node::InlineCode(_)
                | Node::Break
                | Node::Link(_)
                | Node::Image(_)
        )
    }
}

// Convenience constructors
impl Node {
    pub fn text(s: impl Into<String>) -> Self {
        Node::Text(Text { value: s.into() })
    }

    pub fn paragraph(children: Vec<Node>) -> Self {
        Node::Paragraph(Paragraph { children })
    }

    pub fn heading(depth: u8, children: Vec<Node>) -> Self {
        Node::Heading(Heading { depth, children })
    }

    pub fn code(lang: Option<String>, value: impl Into<String>) -> Self {
        Node::Code(Code {
            lang,
            meta: None,
            value: value.into(),
        })
    }

    pub fn inline_code(value: impl Into<String>) -> Self {
        Node::InlineCode(InlineCode {
            value: value.into(),
        })
    }

    pub fn emphasis(children: Vec<Node>) -> Self {
        Node::Emphasis(Emphasis { children })
    }

    pub fn strong(children: Vec<Node>) -> Self {
        Node::Strong(Strong { children })
    }

    pub fn delete(children: Vec<Node>) -> Self {
        Node::Delete(Delete { children })
    }

    pub fn link(url: impl Into<String>, children: Vec<Node>) -> Self {
        Node::Link(Link {
            url: url.into(),
            title: None,
            children,
        })
    }

    pub fn link_with_title(
        url: impl Into<String>,
        title: impl Into<String>,
        children: Vec<Node>,
    ) -> Self {
        Node::Link(Link {
            url: url.into(),
            title: Some(title.into()),
            children,
        })
    }

    pub fn image(url: impl Into<String>, alt: impl Into<String>) -> Self {
        Node::Image(Image {
            url: url.into(),
            title: None,
            alt: alt.into(),
        })
    }

    pub fn list(ordered: bool, children: Vec<Node>) -> Self {
        Node::List(List {
            ordered,
            start: if ordered { Some(1) } else { None },
            spread: false,
            children,
        })
    }

    pub fn ordered_list_from(start: u32, children: Vec<Node>) -> Self {
        Node::List(List {
            ordered: true,
            start: Some(start),
            spread: false,
            children,
        })
    }

    pub fn list_item(children: Vec<Node>) -> Self {
        Node::ListItem(ListItem {
            spread: false,
            checked: None,
            children,
        })
    }

    pub fn task_item(checked: bool, children: Vec<Node>) -> Self {
        Node::ListItem(ListItem {
            spread: false,
            checked: Some(checked),
            children,
        })
    }

    pub fn table(align: Vec<Option<Align>>, children: Vec<Node>) -> Self {
        Node::Table(Table { align, children })
    }

    pub fn table_row(children: Vec<Node>) -> Self {
        Node::TableRow(TableRow { children })
    }

    pub fn table_cell(children: Vec<Node>) -> Self {
        Node::TableCell(TableCell { children })
    }

    pub fn html(value: impl Into<String>) -> Self {
        Node::Html(Html {
            value: value.into(),
        })
    }

    pub fn yaml(value: impl Into<String>) -> Self {
        Node::Yaml(Yaml {
            value: value.into(),
        })
    }

    pub fn blockquote(children: Vec<Node>) -> Self {
        Node::Blockquote(Blockquote { children })
    }

    pub fn callout(kind: CalloutKind, children: Vec<Node>) -> Self {
        Node::Callout(Callout { kind, children })
    }

    pub fn thematic_break() -> Self {
        Node::ThematicBreak
    }

    pub fn line_break() -> Self {
        Node::Break
    }
}

impl Root {
    pub fn new(children: Vec<Node>) -> Self {
        Self { children }
    }
}
