//! Alert blockquote detection
//!
//! A blockquote whose first paragraph starts with a marker such as
//! `[!WARNING]` is retyped to a callout of the matching kind.

use mdoc_mdast::{CalloutKind, Node, Root};

/// Recognized markers, checked in order; the first match wins
pub const ALERT_MARKERS: &[(&str, CalloutKind)] = &[
    ("[!WARNING]", CalloutKind::Warning),
    ("[!NOTE]", CalloutKind::Info),
];

/// Retype alert blockquotes at any depth into callouts
pub fn detect_callouts(root: Root) -> Root {
    Root::new(root.children.into_iter().map(visit).collect())
}

fn visit(node: Node) -> Node {
    let mut node = match node {
        Node::Blockquote(mut quote) => match strip_marker(&mut quote.children) {
            Some(kind) => {
                tracing::debug!(kind = kind.as_str(), "Detected callout");
                Node::callout(kind, quote.children)
            }
            None => Node::Blockquote(quote),
        },
        other => other,
    };

    if let Some(children) = node.children_mut() {
        *children = std::mem::take(children).into_iter().map(visit).collect();
    }
    node
}

/// Strip the first matching marker from the first text of the first
/// paragraph, returning its kind.
fn strip_marker(children: &mut [Node]) -> Option<CalloutKind> {
    let paragraph = children.iter_mut().find_map(|child| match child {
        Node::Paragraph(p) => Some(p),
        _ => None,
    })?;
    let text = paragraph.children.iter_mut().find_map(|child| match child {
        Node::Text(t) => Some(t),
        _ => None,
    })?;

    let (marker, kind) = ALERT_MARKERS
        .iter()
        .find(|(marker, _)| text.value.contains(marker))?;
    text.value = text.value.replace(marker, "");
    Some(*kind)
}
