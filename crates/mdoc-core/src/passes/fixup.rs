//! Pre-parse text fixups
//!
//! Each fixup is a pure rewrite of the whole markdown text. They run in
//! order, each on the output of the previous one.

use regex::Regex;
use std::sync::LazyLock;

/// A text rewrite applied before parsing
pub type Fixup = fn(&str) -> String;

/// Fixups applied by [`apply_fixups`], in order
pub const FIXUPS: &[Fixup] = &[unescape_task_markers];

static ESCAPED_TASK_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^([ \t]*- )\\\[ \]").expect("valid regex"));

/// Apply all fixups left to right
pub fn apply_fixups(text: &str) -> String {
    FIXUPS
        .iter()
        .fold(text.to_string(), |acc, fixup| fixup(&acc))
}

/// Turn `- \[ ]` at the start of a line into `- [ ]` so it parses as an
/// unchecked task item.
pub fn unescape_task_markers(text: &str) -> String {
    ESCAPED_TASK_MARKER.replace_all(text, "${1}[ ]").into_owned()
}
