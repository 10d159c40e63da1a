//! mdast to markdown writer
//!
//! Converts an mdast tree into a markdown string. Block containers
//! (blockquotes, callouts, list items) are rendered into a scratch buffer and
//! then prefixed line by line, so nesting composes without the inner writer
//! knowing its indentation.

use crate::mdast::{Align, Callout, Code, Image, InlineCode, Link, List, Node, Root, Table};
use std::collections::HashMap;

/// Override hook for a single node kind.
///
/// Returns the markdown for `node`, or `None` to defer to the default
/// rendering.
pub type Handler = fn(&Node, &Scope<'_>) -> Option<String>;

/// Position of a node in the tree, as seen by a [`Handler`]
#[derive(Debug, Clone, Copy)]
pub struct Scope<'a> {
    ancestors: &'a [&'static str],
}

impl Scope<'_> {
    /// Whether any ancestor has the given kind
    pub fn within(&self, kind: &str) -> bool {
        self.ancestors.iter().any(|k| *k == kind)
    }
}

/// Options for the markdown writer
///
/// The defaults are the house style: `-` bullets and rules, `*` emphasis,
/// `**` strong, fenced code, incrementing ordered markers.
#[derive(Debug, Clone)]
pub struct WriterOptions {
    /// Raw front matter written as a leading `---` block
    pub front_matter: Option<String>,
    /// Bullet for unordered lists
    pub bullet: char,
    /// Bullet used for an unordered list directly following another one
    pub bullet_other: char,
    /// Character repeated three times for thematic breaks
    pub rule: char,
    /// Emphasis marker
    pub emphasis: char,
    /// Strong marker, written twice
    pub strong: char,
    /// Number ordered items `start, start + 1, ...` instead of repeating `start`
    pub increment_list_marker: bool,
    /// Per-kind rendering overrides, keyed by mdast kind
    pub handlers: HashMap<&'static str, Handler>,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            front_matter: None,
            bullet: '-',
            bullet_other: '*',
            rule: '-',
            emphasis: '*',
            strong: '*',
            increment_list_marker: true,
            handlers: HashMap::new(),
        }
    }
}

impl WriterOptions {
    /// Register an override for the given node kind
    #[must_use]
    pub fn with_handler(mut self, kind: &'static str, handler: Handler) -> Self {
        self.handlers.insert(kind, handler);
        self
    }
}

/// Convert mdast to markdown
pub fn mdast_to_markdown(root: &Root, options: &WriterOptions) -> String {
    let mut writer = Writer::new(options);
    writer.write_root(root)
}

/// Markdown writer state
struct Writer<'a> {
    options: &'a WriterOptions,
    output: String,
    /// Whether we're at the start of a line
    at_line_start: bool,
    /// Kinds of the nodes enclosing the one being written
    ancestors: Vec<&'static str>,
}

impl<'a> Writer<'a> {
    fn new(options: &'a WriterOptions) -> Self {
        Self {
            options,
            output: String::new(),
            at_line_start: true,
            ancestors: Vec::new(),
        }
    }

    fn write_root(&mut self, root: &Root) -> String {
        if let Some(front_matter) = &self.options.front_matter {
            self.write_front_matter(front_matter);
        }

        self.ancestors.push("root");
        self.write_blocks(&root.children, false);
        self.ancestors.pop();

        if !self.output.is_empty() && !self.output.ends_with('\n') {
            self.output.push('\n');
        }
        std::mem::take(&mut self.output)
    }

    fn write_front_matter(&mut self, raw: &str) {
        let raw = raw.trim_end_matches('\n');
        if raw.is_empty() {
            return;
        }
        self.push("---\n");
        self.push(raw);
        self.push("\n---\n\n");
    }

    /// Write sibling blocks separated by blank lines.
    ///
    /// In tight containers a nested list follows its sibling on the next line.
    fn write_blocks(&mut self, children: &[Node], tight: bool) {
        for (i, node) in children.iter().enumerate() {
            let mut alternate = false;
            if i > 0 {
                let previous = &children[i - 1];
                if tight && matches!(node, Node::List(_)) {
                    self.push("\n");
                } else {
                    self.push("\n\n");
                }
                // Two adjacent lists of the same flavour would merge when reparsed
                if let (Node::List(prev), Node::List(cur)) = (previous, node) {
                    alternate = prev.ordered == cur.ordered;
                }
            }
            match node {
                Node::List(l) if alternate => self.write_list(l, true),
                _ => self.write_node(node),
            }
        }
    }

    fn write_node(&mut self, node: &Node) {
        if let Some(handler) = self.options.handlers.get(node.kind()) {
            let scope = Scope {
                ancestors: &self.ancestors,
            };
            if let Some(rendered) = handler(node, &scope) {
                self.push(&rendered);
                return;
            }
        }

        self.ancestors.push(node.kind());
        match node {
            Node::Root(r) => self.write_blocks(&r.children, false),
            Node::Heading(h) => {
                let depth = h.depth.clamp(1, 6) as usize;
                self.push(&"#".repeat(depth));
                self.push(" ");
                // Heading content is escaped like the start of a line
                self.at_line_start = true;
                let start = self.output.len();
                self.write_inlines(&h.children);
                escape_closing_hashes(&mut self.output, start);
            }
            Node::Paragraph(p) => self.write_inlines(&p.children),
            Node::ThematicBreak => {
                let rule: String = std::iter::repeat_n(self.options.rule, 3).collect();
                self.push(&rule);
            }
            Node::Blockquote(b) => {
                let body = self.capture(|w| w.write_blocks(&b.children, false));
                self.push(&prefix_lines(&body, "> ", ">"));
            }
            Node::Callout(c) => self.write_callout(c),
            Node::List(l) => self.write_list(l, false),
            // A list item outside a list: render it as a one-item list
            Node::ListItem(_) => self.write_list(
                &List {
                    ordered: false,
                    start: None,
                    spread: false,
                    children: vec![node.clone()],
                },
                false,
            ),
            Node::Code(c) => self.write_code(c),
            Node::Table(t) => self.write_table(t),
            Node::TableRow(row) => {
                let cells = self.render_cells(&row.children);
                self.push(&format_row(&cells, cells.len()));
            }
            Node::TableCell(c) => self.write_inlines(&c.children),
            Node::Html(h) => self.push(&h.value),
            Node::Yaml(y) => {
                self.push("---\n");
                self.push(&y.value);
                self.push("\n---");
            }
            Node::Text(t) => self.write_text(&t.value),
            Node::Emphasis(e) => {
                let marker = self.options.emphasis.to_string();
                self.push(&marker);
                self.write_inlines(&e.children);
                self.push(&marker);
            }
            Node::Strong(s) => {
                let marker: String = std::iter::repeat_n(self.options.strong, 2).collect();
                self.push(&marker);
                self.write_inlines(&s.children);
                self.push(&marker);
            }
            Node::Delete(d) => {
                self.push("~~");
                self.write_inlines(&d.children);
                self.push("~~");
            }
            Node::InlineCode(c) => self.write_inline_code(c),
            Node::Break => self.write_break(),
            Node::Link(l) => self.write_link(l),
            Node::Image(img) => self.write_image(img),
        }
        self.ancestors.pop();
    }

    fn write_inlines(&mut self, children: &[Node]) {
        for child in children {
            self.write_node(child);
        }
    }

    fn write_callout(&mut self, c: &Callout) {
        // The marker shares the first line with a leading paragraph
        let shares_line = matches!(c.children.first(), Some(Node::Paragraph(_)));
        let body = self.capture(|w| {
            w.at_line_start = !shares_line;
            w.write_blocks(&c.children, false)
        });
        let marker = c.kind.marker();
        let content = match c.children.first() {
            Some(Node::Paragraph(_)) => format!("{marker}{body}"),
            _ if body.is_empty() => marker.to_string(),
            _ => format!("{marker}\n{body}"),
        };
        self.push(&prefix_lines(&content, "> ", ">"));
    }

    fn write_list(&mut self, l: &List, alternate: bool) {
        let mut number = l.start.unwrap_or(1);
        let mut first = true;
        for child in &l.children {
            let Node::ListItem(item) = child else {
                continue;
            };
            if !first {
                self.push(if l.spread { "\n\n" } else { "\n" });
            }
            first = false;

            let marker = if l.ordered {
                let delimiter = if alternate { ')' } else { '.' };
                let marker = format!("{number}{delimiter} ");
                if self.options.increment_list_marker {
                    number += 1;
                }
                marker
            } else {
                let bullet = if alternate {
                    self.options.bullet_other
                } else {
                    self.options.bullet
                };
                format!("{bullet} ")
            };

            self.ancestors.push("listItem");
            let tight = !l.spread && !item.spread;
            let body = self.capture(|w| w.write_blocks(&item.children, tight));
            self.ancestors.pop();

            self.push(&marker);
            match item.checked {
                Some(true) => self.push("[x] "),
                Some(false) => self.push("[ ] "),
                None => {}
            }
            let indent = " ".repeat(marker.len());
            self.push(&indent_continuation(&body, &indent));
        }
    }

    fn write_code(&mut self, c: &Code) {
        // Determine fence length: must be longer than any backtick sequence in content
        let fence_len = calculate_fence_length(&c.value);
        let fence = "`".repeat(fence_len);

        self.push(&fence);
        if let Some(lang) = &c.lang {
            self.push(lang);
            if let Some(meta) = &c.meta {
                self.push(" ");
                self.push(meta);
            }
        }
        self.push("\n");
        self.push(&c.value);
        if !c.value.is_empty() && !c.value.ends_with('\n') {
            self.push("\n");
        }
        self.push(&fence);
    }

    fn write_table(&mut self, t: &Table) {
        let rows: Vec<&[Node]> = t
            .children
            .iter()
            .filter_map(|n| match n {
                Node::TableRow(r) => Some(r.children.as_slice()),
                _ => None,
            })
            .collect();

        if rows.is_empty() {
            return;
        }

        let rendered: Vec<Vec<String>> = rows
            .iter()
            .map(|cells| {
                self.ancestors.push("tableRow");
                let cells = self.render_cells(cells);
                self.ancestors.pop();
                cells
            })
            .collect();

        let num_cols = rendered
            .iter()
            .map(Vec::len)
            .max()
            .unwrap_or(0)
            .max(t.align.len())
            .max(1);

        let mut lines = Vec::with_capacity(rendered.len() + 1);
        lines.push(format_row(&rendered[0], num_cols));

        let mut separator = String::from("|");
        for i in 0..num_cols {
            match t.align.get(i).copied().flatten() {
                Some(Align::Left) => separator.push_str(":---|"),
                Some(Align::Center) => separator.push_str(":--:|"),
                Some(Align::Right) => separator.push_str("---:|"),
                None => separator.push_str("----|"),
            }
        }
        lines.push(separator);

        for cells in rendered.iter().skip(1) {
            lines.push(format_row(cells, num_cols));
        }
        self.push(&lines.join("\n"));
    }

    fn render_cells(&mut self, cells: &[Node]) -> Vec<String> {
        cells
            .iter()
            .filter(|cell| matches!(cell, Node::TableCell(_)))
            .map(|cell| self.capture(|w| w.write_node(cell)))
            .collect()
    }

    fn write_text(&mut self, value: &str) {
        let in_cell = self.within("tableCell");
        let single_line = in_cell || self.within("heading");
        let lines: Vec<&str> = value.split('\n').collect();
        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                self.push(if single_line { " " } else { "\n" });
            }
            let mut escaped = escape_text(line, self.at_line_start, in_cell);
            // Trailing spaces before a newline would be dropped or read as a hard break
            if !single_line && i + 1 < lines.len() {
                escaped = encode_trailing_whitespace(&escaped);
            }
            self.push(&escaped);
        }
    }

    fn write_inline_code(&mut self, c: &InlineCode) {
        // Add space before if the previous character is a backtick
        // This prevents `foo``bar` which CommonMark parses as a single code span
        if self.output.ends_with('`') {
            self.push(" ");
        }

        let mut value = c.value.replace('\n', " ");
        if self.within("tableCell") {
            value = value.replace('|', "\\|");
        }

        let fence = "`".repeat(longest_backtick_run(&value) + 1);
        let padded = value.starts_with('`')
            || value.ends_with('`')
            || (value.starts_with(' ') && value.ends_with(' ') && !value.trim().is_empty());
        self.push(&fence);
        if padded {
            self.push(" ");
        }
        self.push(&value);
        if padded {
            self.push(" ");
        }
        self.push(&fence);
    }

    fn write_break(&mut self) {
        if self.within("heading") || self.within("tableCell") {
            self.push(" ");
        } else {
            self.push("  \n");
        }
    }

    fn write_link(&mut self, l: &Link) {
        // `!` right before the bracket would turn the link into an image
        if ends_with_unescaped(&self.output, '!') {
            self.output.pop();
            self.push("\\!");
        }
        self.push("[");
        self.write_inlines(&l.children);
        self.push("](");
        self.push(&format_destination(&l.url));
        if let Some(title) = &l.title {
            self.push(&format_title(title));
        }
        self.push(")");
    }

    fn write_image(&mut self, img: &Image) {
        self.push("![");
        self.push(&escape_text(&img.alt, false, self.within("tableCell")));
        self.push("](");
        self.push(&format_destination(&img.url));
        if let Some(title) = &img.title {
            self.push(&format_title(title));
        }
        self.push(")");
    }

    // Helper methods

    fn push(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        self.output.push_str(s);
        self.at_line_start = s.ends_with('\n');
    }

    fn within(&self, kind: &str) -> bool {
        self.ancestors.iter().any(|k| *k == kind)
    }

    /// Render into a scratch buffer, starting at a fresh line
    fn capture(&mut self, f: impl FnOnce(&mut Self)) -> String {
        let saved = std::mem::take(&mut self.output);
        let saved_line_start = std::mem::replace(&mut self.at_line_start, true);
        f(self);
        self.at_line_start = saved_line_start;
        std::mem::replace(&mut self.output, saved)
    }
}

fn format_row(cells: &[String], num_cols: usize) -> String {
    let mut line = String::from("|");
    for i in 0..num_cols {
        line.push(' ');
        if let Some(cell) = cells.get(i) {
            line.push_str(cell);
        }
        line.push_str(" |");
    }
    line
}

/// Prefix every line; empty lines get the trimmed prefix
fn prefix_lines(body: &str, prefix: &str, empty_prefix: &str) -> String {
    body.split('\n')
        .map(|line| {
            if line.is_empty() {
                empty_prefix.to_string()
            } else {
                format!("{prefix}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Indent every line but the first
fn indent_continuation(body: &str, indent: &str) -> String {
    body.split('\n')
        .enumerate()
        .map(|(i, line)| {
            if i == 0 || line.is_empty() {
                line.to_string()
            } else {
                format!("{indent}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_destination(url: &str) -> String {
    let url = escape_char_references(url);
    if url.chars().any(|c| c.is_whitespace() || c == '(' || c == ')') {
        format!("<{}>", url.replace('<', "%3C").replace('>', "%3E"))
    } else {
        url
    }
}

fn format_title(title: &str) -> String {
    let title = title.replace('\\', "\\\\").replace('"', "\\\"");
    format!(" \"{}\"", escape_char_references(&title))
}

/// Whether `text` ends with `ch` that is not itself backslash-escaped
fn ends_with_unescaped(text: &str, ch: char) -> bool {
    let Some(rest) = text.strip_suffix(ch) else {
        return false;
    };
    let backslashes = rest.len() - rest.trim_end_matches('\\').len();
    backslashes % 2 == 0
}

/// `&name;`, `&#123;` and `&#x1F;` would be decoded when read back
fn starts_char_reference(text: &str) -> bool {
    let Some(rest) = text.strip_prefix('&') else {
        return false;
    };
    let body = rest
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '#'))
        .map_or(rest, |end| &rest[..end]);
    !body.is_empty() && rest[body.len()..].starts_with(';')
}

fn escape_char_references(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for (i, ch) in text.char_indices() {
        if ch == '&' && starts_char_reference(&text[i..]) {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// Spaces and tabs as numeric references, which the parser never strips
fn encode_whitespace(ws: &str) -> String {
    ws.chars()
        .map(|c| if c == '\t' { "&#x9;" } else { "&#x20;" })
        .collect()
}

fn encode_trailing_whitespace(line: &str) -> String {
    let body = line.trim_end_matches([' ', '\t']);
    if body.len() == line.len() {
        return line.to_string();
    }
    format!("{}{}", body, encode_whitespace(&line[body.len()..]))
}

/// A heading ending in ` #` would lose the run as a closing sequence
fn escape_closing_hashes(output: &mut String, start: usize) {
    let content = &output[start..];
    if !content.ends_with('#') {
        return;
    }
    let body = content.trim_end_matches('#');
    if body.is_empty() || body.ends_with([' ', '\t']) {
        output.insert(start + body.len(), '\\');
    }
}

/// Escape characters that would otherwise be read back as markup
fn escape_text(text: &str, at_line_start: bool, in_cell: bool) -> String {
    if at_line_start {
        // Leading whitespace would be stripped, or open an indented code block
        let body = text.trim_start_matches([' ', '\t']);
        if body.len() < text.len() {
            let mut out = encode_whitespace(&text[..text.len() - body.len()]);
            out.push_str(&escape_text(body, false, in_cell));
            return out;
        }
    }

    let mut out = String::with_capacity(text.len());
    for (i, ch) in text.char_indices() {
        match ch {
            '\\' | '*' | '_' | '`' | '[' | ']' | '<' | '~' => {
                out.push('\\');
                out.push(ch);
            }
            '&' if starts_char_reference(&text[i..]) => out.push_str("\\&"),
            '|' if in_cell => out.push_str("\\|"),
            _ if i == 0 && at_line_start && starts_block(text) => {
                out.push('\\');
                out.push(ch);
            }
            _ => out.push(ch),
        }
    }

    if at_line_start {
        escape_ordered_marker(&out)
    } else {
        out
    }
}

/// Whether text at the start of a line would open a block construct
fn starts_block(text: &str) -> bool {
    let mut chars = text.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    let rest = chars.as_str();
    match first {
        '>' => true,
        '#' => {
            let after = text.trim_start_matches('#');
            text.len() - after.len() <= 6 && (after.is_empty() || after.starts_with([' ', '\t']))
        }
        '+' => rest.is_empty() || rest.starts_with([' ', '\t']),
        '-' | '=' => {
            rest.is_empty()
                || rest.starts_with([' ', '\t'])
                || text.trim_end().chars().all(|c| c == first)
        }
        _ => false,
    }
}

/// `1. foo` at the start of a line would open an ordered list
fn escape_ordered_marker(text: &str) -> String {
    let digits = text.chars().take_while(char::is_ascii_digit).count();
    if digits == 0 || digits > 9 {
        return text.to_string();
    }
    let rest = &text[digits..];
    let mut chars = rest.chars();
    match (chars.next(), chars.next()) {
        (Some(delim @ ('.' | ')')), None | Some(' ' | '\t')) => {
            format!("{}\\{}{}", &text[..digits], delim, &rest[1..])
        }
        _ => text.to_string(),
    }
}

fn longest_backtick_run(content: &str) -> usize {
    let mut max_backticks = 0;
    let mut current_run = 0;

    for c in content.chars() {
        if c == '`' {
            current_run += 1;
            max_backticks = max_backticks.max(current_run);
        } else {
            current_run = 0;
        }
    }
    max_backticks
}

/// Calculate the minimum fence length needed for a code block.
///
/// The fence must be longer than any sequence of consecutive backticks in the content.
/// Returns at least 3 (the minimum for a valid fenced code block).
fn calculate_fence_length(content: &str) -> usize {
    3.max(longest_backtick_run(content) + 1)
}
