//! Normalization passes run around the tree conversion
//!
//! - [`fixup`]: string rewrites applied to markdown before parsing
//! - [`front_matter`]: splits the leading YAML block out of the tree
//! - [`callout`]: retypes alert blockquotes

pub mod callout;
pub mod fixup;
pub mod front_matter;

pub use callout::{ALERT_MARKERS, detect_callouts};
pub use fixup::{FIXUPS, Fixup, apply_fixups, unescape_task_markers};
pub use front_matter::extract_front_matter;
