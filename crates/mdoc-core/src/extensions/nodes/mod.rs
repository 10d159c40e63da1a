//! Block and inline node types

pub mod blockquote;
pub mod callout;
pub mod code_block;
pub mod doc;
pub mod hard_break;
pub mod heading;
pub mod horizontal_rule;
pub mod image;
pub mod list;
pub mod list_item;
pub mod paragraph;
pub mod table;
pub mod text;

use crate::registry::Extension;

/// Node extensions
pub fn extensions() -> Vec<Extension> {
    let mut extensions = vec![
        doc::extension(),
        paragraph::extension(),
        text::extension(),
        hard_break::extension(),
        heading::extension(),
        blockquote::extension(),
        callout::extension(),
        code_block::extension(),
        horizontal_rule::extension(),
        image::extension(),
    ];
    extensions.extend(list::extensions());
    extensions.extend(list_item::extensions());
    extensions.extend(table::extensions());
    extensions
}
