//! Markdown output configuration
//!
//! The writer in `mdoc-mdast` supplies the house style; this module adds the
//! overrides the document tree needs.

use mdoc_mdast::{Node, Root, Scope, WriterOptions, mdast_to_markdown};

/// Writer options with the break-in-table-cell override installed
pub fn serializer_options() -> WriterOptions {
    WriterOptions::default().with_handler("break", cell_break)
}

/// Table cells are a single line, so a break inside one is written as a
/// `<br>` tag. Elsewhere the default break is used.
fn cell_break(_: &Node, scope: &Scope<'_>) -> Option<String> {
    scope.within("tableCell").then(|| "<br>".to_string())
}

/// Serialize mdast with the default options and optional front matter
pub fn serialize(root: &Root, front_matter: Option<&str>) -> String {
    let mut options = serializer_options();
    options.front_matter = front_matter
        .filter(|raw| !raw.is_empty())
        .map(str::to_string);
    mdast_to_markdown(root, &options)
}
