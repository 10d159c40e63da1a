//! Front matter extraction

use mdoc_mdast::{Node, Root};

/// Remove the first root-level YAML block and return its raw value.
///
/// Returns an empty string and the untouched tree when there is none.
pub fn extract_front_matter(mut root: Root) -> (Root, String) {
    let Some(index) = root
        .children
        .iter()
        .position(|node| matches!(node, Node::Yaml(_)))
    else {
        return (root, String::new());
    };

    let raw = match root.children.remove(index) {
        Node::Yaml(yaml) => yaml.value,
        _ => String::new(),
    };
    tracing::debug!(len = raw.len(), "Extracted front matter");
    (root, raw)
}
