//! Markdown to mdast parser
//!
//! Folds pulldown-cmark events into an mdast tree. Alert blockquote syntax
//! is left to the callout pass, so `[!NOTE]` arrives here as plain text.

use mdoc_mdast::{Align, Code, Image, Link, List, ListItem, Node, Root};
use pulldown_cmark::{
    Alignment, CodeBlockKind, Event, HeadingLevel, MetadataBlockKind, Options, Parser, Tag, TagEnd,
};

/// Parser options used for all markdown input
pub fn parser_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_YAML_STYLE_METADATA_BLOCKS
}

/// Parse markdown text into mdast
pub fn parse(text: &str) -> Root {
    let mut builder = TreeBuilder::new();
    for event in Parser::new_ext(text, parser_options()) {
        builder.event(event);
    }
    builder.finish()
}

/// Node under construction
enum Frame {
    Root,
    Paragraph,
    Heading(u8),
    Blockquote,
    List { start: Option<u64> },
    Item { checked: Option<bool>, has_paragraph: bool },
    CodeBlock { lang: Option<String>, meta: Option<String>, value: String },
    Table(Vec<Option<Align>>),
    TableRow,
    TableCell,
    Emphasis,
    Strong,
    Delete,
    Link { url: String, title: Option<String> },
    Image { url: String, title: Option<String> },
    Yaml(String),
    Html(String),
    /// Constructs without an mdast form; children are kept
    Transparent,
}

struct Open {
    frame: Frame,
    children: Vec<Node>,
}

struct TreeBuilder {
    stack: Vec<Open>,
}

impl TreeBuilder {
    fn new() -> Self {
        Self {
            stack: vec![Open {
                frame: Frame::Root,
                children: Vec::new(),
            }],
        }
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => self.push(Node::inline_code(code.to_string())),
            Event::Html(html) => self.html(&html),
            Event::InlineHtml(html) => {
                if is_break_tag(&html) {
                    self.push(Node::line_break());
                } else {
                    self.push(Node::html(html.to_string()));
                }
            }
            Event::SoftBreak => self.text("\n"),
            Event::HardBreak => self.push(Node::line_break()),
            Event::Rule => self.push(Node::thematic_break()),
            Event::TaskListMarker(checked) => self.task_marker(checked),
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        let frame = match tag {
            Tag::Paragraph => {
                if let Some(Open {
                    frame: Frame::Item { has_paragraph, .. },
                    ..
                }) = self.stack.last_mut()
                {
                    *has_paragraph = true;
                }
                Frame::Paragraph
            }
            Tag::Heading { level, .. } => Frame::Heading(heading_depth(level)),
            Tag::BlockQuote(_) => Frame::Blockquote,
            Tag::CodeBlock(kind) => {
                let (lang, meta) = match kind {
                    CodeBlockKind::Fenced(info) => split_info(&info),
                    CodeBlockKind::Indented => (None, None),
                };
                Frame::CodeBlock {
                    lang,
                    meta,
                    value: String::new(),
                }
            }
            Tag::List(start) => Frame::List { start },
            Tag::Item => Frame::Item {
                checked: None,
                has_paragraph: false,
            },
            Tag::Table(alignments) => Frame::Table(alignments.iter().map(convert_align).collect()),
            Tag::TableHead | Tag::TableRow => Frame::TableRow,
            Tag::TableCell => Frame::TableCell,
            Tag::Emphasis => Frame::Emphasis,
            Tag::Strong => Frame::Strong,
            Tag::Strikethrough => Frame::Delete,
            Tag::Link {
                dest_url, title, ..
            } => Frame::Link {
                url: dest_url.to_string(),
                title: non_empty(&title),
            },
            Tag::Image {
                dest_url, title, ..
            } => Frame::Image {
                url: dest_url.to_string(),
                title: non_empty(&title),
            },
            Tag::MetadataBlock(MetadataBlockKind::YamlStyle) => Frame::Yaml(String::new()),
            Tag::HtmlBlock => Frame::Html(String::new()),
            _ => Frame::Transparent,
        };
        self.stack.push(Open {
            frame,
            children: Vec::new(),
        });
    }

    fn end(&mut self, _tag: TagEnd) {
        // The root is never closed by an event
        if self.stack.len() > 1 {
            self.close();
        }
    }

    /// Pop the innermost open node and attach it to its parent
    fn close(&mut self) {
        let Some(Open { frame, children }) = self.stack.pop() else {
            return;
        };
        let nodes = match frame {
            Frame::Root => vec![Node::Root(Root::new(children))],
            Frame::Paragraph => vec![Node::paragraph(children)],
            Frame::Heading(depth) => vec![Node::heading(depth, children)],
            Frame::Blockquote => vec![Node::blockquote(children)],
            Frame::List { start } => {
                let spread = children
                    .iter()
                    .any(|item| matches!(item, Node::ListItem(i) if i.spread));
                vec![Node::List(List {
                    ordered: start.is_some(),
                    start: start.map(|s| u32::try_from(s).unwrap_or(u32::MAX)),
                    spread,
                    children,
                })]
            }
            Frame::Item {
                checked,
                has_paragraph,
            } => vec![Node::ListItem(ListItem {
                spread: has_paragraph,
                checked,
                children: wrap_inline(children),
            })],
            Frame::CodeBlock { lang, meta, value } => vec![Node::Code(Code {
                lang,
                meta,
                value: strip_final_newline(value),
            })],
            Frame::Table(align) => vec![Node::table(align, children)],
            Frame::TableRow => vec![Node::table_row(children)],
            Frame::TableCell => vec![Node::table_cell(children)],
            Frame::Emphasis => vec![Node::emphasis(children)],
            Frame::Strong => vec![Node::strong(children)],
            Frame::Delete => vec![Node::delete(children)],
            Frame::Link { url, title } => vec![Node::Link(Link {
                url,
                title,
                children,
            })],
            Frame::Image { url, title } => vec![Node::Image(Image {
                url,
                title,
                alt: plain_text(&children),
            })],
            Frame::Yaml(value) => vec![Node::yaml(strip_final_newline(value))],
            Frame::Html(value) => vec![Node::html(strip_final_newline(value))],
            Frame::Transparent => children,
        };
        for node in nodes {
            self.push(node);
        }
    }

    fn finish(mut self) -> Root {
        while self.stack.len() > 1 {
            self.close();
        }
        match self.stack.pop() {
            Some(open) => Root::new(open.children),
            None => Root::default(),
        }
    }

    /// Append a node to the innermost open node, merging adjacent text
    fn push(&mut self, node: Node) {
        let Some(top) = self.stack.last_mut() else {
            return;
        };
        if let (Some(Node::Text(prev)), Node::Text(next)) = (top.children.last_mut(), &node) {
            prev.value.push_str(&next.value);
            return;
        }
        top.children.push(node);
    }

    fn text(&mut self, text: &str) {
        // Literal blocks collect their content as a single value
        if let Some(Open {
            frame: Frame::CodeBlock { value, .. } | Frame::Yaml(value) | Frame::Html(value),
            ..
        }) = self.stack.last_mut()
        {
            value.push_str(text);
            return;
        }
        self.push(Node::text(text));
    }

    fn html(&mut self, html: &str) {
        if let Some(Open {
            frame: Frame::Html(value),
            ..
        }) = self.stack.last_mut()
        {
            value.push_str(html);
            return;
        }
        self.push(Node::html(html.trim_end_matches('\n')));
    }

    /// Mark the innermost list item as a task item
    fn task_marker(&mut self, checked: bool) {
        let slot = self.stack.iter_mut().rev().find_map(|open| match &mut open.frame {
            Frame::Item { checked: slot, .. } => Some(slot),
            _ => None,
        });
        if let Some(slot) = slot {
            *slot = Some(checked);
        }
    }
}

/// Wrap runs of inline content of a tight list item into paragraphs
fn wrap_inline(children: Vec<Node>) -> Vec<Node> {
    let mut out = Vec::with_capacity(children.len());
    let mut run = Vec::new();
    for child in children {
        if child.is_inline() {
            run.push(child);
            continue;
        }
        if !run.is_empty() {
            out.push(Node::paragraph(std::mem::take(&mut run)));
        }
        out.push(child);
    }
    if !run.is_empty() {
        out.push(Node::paragraph(run));
    }
    out
}

fn heading_depth(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

fn convert_align(alignment: &Alignment) -> Option<Align> {
    match alignment {
        Alignment::None => None,
        Alignment::Left => Some(Align::Left),
        Alignment::Center => Some(Align::Center),
        Alignment::Right => Some(Align::Right),
    }
}

/// Split a fence info string into language and meta
fn split_info(info: &str) -> (Option<String>, Option<String>) {
    let info = info.trim();
    if info.is_empty() {
        return (None, None);
    }
    match info.split_once(char::is_whitespace) {
        Some((lang, meta)) => (Some(lang.to_string()), non_empty(meta.trim())),
        None => (Some(info.to_string()), None),
    }
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

fn strip_final_newline(mut value: String) -> String {
    if value.ends_with('\n') {
        value.pop();
    }
    value
}

fn is_break_tag(html: &str) -> bool {
    let tag = html.trim().to_ascii_lowercase();
    matches!(tag.as_str(), "<br>" | "<br/>" | "<br />")
}

fn plain_text(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        match node {
            Node::Text(t) => out.push_str(&t.value),
            Node::InlineCode(c) => out.push_str(&c.value),
            Node::Image(i) => out.push_str(&i.alt),
            other => out.push_str(&plain_text(other.children())),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt::Write;

    /// One line per node, children indented under their parent
    fn outline(root: &Root) -> String {
        let mut out = String::new();
        for node in &root.children {
            write_outline(node, 0, &mut out);
        }
        out.trim_end().to_string()
    }

    fn write_outline(node: &Node, depth: usize, out: &mut String) {
        let label = match node {
            Node::Text(t) => format!("text {:?}", t.value),
            Node::InlineCode(c) => format!("inlineCode {:?}", c.value),
            Node::Heading(h) => format!("heading {}", h.depth),
            Node::List(l) => format!(
                "list ordered={} start={:?} spread={}",
                l.ordered, l.start, l.spread
            ),
            Node::ListItem(i) => format!("listItem spread={} checked={:?}", i.spread, i.checked),
            Node::Code(c) => format!("code lang={:?} meta={:?} {:?}", c.lang, c.meta, c.value),
            Node::Link(l) => format!("link {:?} title={:?}", l.url, l.title),
            Node::Image(i) => format!("image {:?} alt={:?}", i.url, i.alt),
            Node::Table(t) => format!("table {:?}", t.align),
            Node::Yaml(y) => format!("yaml {:?}", y.value),
            Node::Html(h) => format!("html {:?}", h.value),
            other => other.kind().to_string(),
        };
        let _ = writeln!(out, "{}{}", "  ".repeat(depth), label);
        for child in node.children() {
            write_outline(child, depth + 1, out);
        }
    }

    #[test]
    fn test_mixed_document_outline() {
        let root = parse(
            "# Title\n\nSome *text* and `code`.\n\n> [!NOTE] quoted\n\n```rust title=x\nfn main() {}\n```\n",
        );
        insta::assert_snapshot!(outline(&root), @r#"
        heading 1
          text "Title"
        paragraph
          text "Some "
          emphasis
            text "text"
          text " and "
          inlineCode "code"
          text "."
        blockquote
          paragraph
            text "[!NOTE] quoted"
        code lang=Some("rust") meta=Some("title=x") "fn main() {}"
        "#);
    }

    #[test]
    fn test_heading_and_paragraph() {
        let root = parse("# Title\n\nSome *text* here.\n");
        assert_eq!(
            root.children,
            vec![
                Node::heading(1, vec![Node::text("Title")]),
                Node::paragraph(vec![
                    Node::text("Some "),
                    Node::emphasis(vec![Node::text("text")]),
                    Node::text(" here."),
                ]),
            ]
        );
    }

    #[test]
    fn test_soft_and_hard_breaks() {
        let root = parse("a\nb  \nc\n");
        assert_eq!(
            root.children,
            vec![Node::paragraph(vec![
                Node::text("a\nb"),
                Node::line_break(),
                Node::text("c"),
            ])]
        );
    }

    #[test]
    fn test_fenced_code() {
        let root = parse("```rust title=x\nfn main() {}\n```\n");
        assert_eq!(
            root.children,
            vec![Node::Code(Code {
                lang: Some("rust".to_string()),
                meta: Some("title=x".to_string()),
                value: "fn main() {}".to_string(),
            })]
        );
    }

    #[test]
    fn test_tight_list_items_get_paragraphs() {
        let root = parse("- one\n- two\n  1. nested\n");
        insta::assert_snapshot!(outline(&root), @r#"
        list ordered=false start=None spread=false
          listItem spread=false checked=None
            paragraph
              text "one"
          listItem spread=false checked=None
            paragraph
              text "two"
            list ordered=true start=Some(1) spread=false
              listItem spread=false checked=None
                paragraph
                  text "nested"
        "#);
    }

    #[test]
    fn test_loose_list_is_spread() {
        let root = parse("- one\n\n- two\n");
        insta::assert_snapshot!(outline(&root), @r#"
        list ordered=false start=None spread=true
          listItem spread=true checked=None
            paragraph
              text "one"
          listItem spread=true checked=None
            paragraph
              text "two"
        "#);
    }

    #[test]
    fn test_ordered_list_start() {
        let root = parse("3. a\n4. b\n");
        let Node::List(list) = &root.children[0] else {
            panic!("Expected List node");
        };
        assert!(list.ordered);
        assert_eq!(list.start, Some(3));
    }

    #[test]
    fn test_task_items() {
        let root = parse("- [x] done\n- [ ] todo\n");
        let Node::List(list) = &root.children[0] else {
            panic!("Expected List node");
        };
        assert_eq!(
            list.children,
            vec![
                Node::task_item(true, vec![Node::paragraph(vec![Node::text("done")])]),
                Node::task_item(false, vec![Node::paragraph(vec![Node::text("todo")])]),
            ]
        );
    }

    #[test]
    fn test_table_with_break_tag() {
        let root = parse("| A | B |\n|:--|--:|\n| x<br>y | z |\n");
        insta::assert_snapshot!(outline(&root), @r#"
        table [Some(Left), Some(Right)]
          tableRow
            tableCell
              text "A"
            tableCell
              text "B"
          tableRow
            tableCell
              text "x"
              break
              text "y"
            tableCell
              text "z"
        "#);
    }

    #[test]
    fn test_character_references_are_decoded() {
        let root = parse("&#x20;&#x20;x \\&lt; &amp;\n");
        insta::assert_snapshot!(outline(&root), @r#"
        paragraph
          text "  x &lt; &"
        "#);
    }

    #[test]
    fn test_link_and_image() {
        let root = parse("[site](https://example.com \"Home\") ![alt *text*](img.png)\n");
        assert_eq!(
            root.children,
            vec![Node::paragraph(vec![
                Node::link_with_title("https://example.com", "Home", vec![Node::text("site")]),
                Node::text(" "),
                Node::image("img.png", "alt text"),
            ])]
        );
    }

    #[test]
    fn test_front_matter_block() {
        let root = parse("---\ntitle: Hello\ntags: [a]\n---\n\n# Hello\n");
        assert_eq!(
            root.children,
            vec![
                Node::yaml("title: Hello\ntags: [a]"),
                Node::heading(1, vec![Node::text("Hello")]),
            ]
        );
    }

    #[test]
    fn test_alert_marker_stays_text() {
        let root = parse("> [!WARNING] be careful\n");
        assert_eq!(
            root.children,
            vec![Node::blockquote(vec![Node::paragraph(vec![Node::text(
                "[!WARNING] be careful"
            )])])]
        );
    }

    #[test]
    fn test_split_info() {
        assert_eq!(split_info(""), (None, None));
        assert_eq!(split_info("python"), (Some("python".to_string()), None));
        assert_eq!(
            split_info("js  {.x}"),
            (Some("js".to_string()), Some("{.x}".to_string()))
        );
    }

    #[test]
    fn test_break_tag_variants() {
        assert!(is_break_tag("<br>"));
        assert!(is_break_tag("<BR/>"));
        assert!(is_break_tag("<br />"));
        assert!(!is_break_tag("<b>"));
    }
}
