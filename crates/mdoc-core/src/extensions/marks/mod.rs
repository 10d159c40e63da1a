//! Inline mark types
//!
//! Declaration order is the mark rank: a link wraps strong text, strong wraps
//! emphasis, and inline code is innermost.

pub mod bold;
pub mod code;
pub mod italic;
pub mod link;
pub mod strike;

use crate::context::ConversionContext;
use crate::document::{Attrs, DocNode};
use crate::error::ConvertError;
use crate::extensions::mark_inline;
use crate::registry::Extension;
use crate::schema::Schema;

/// Mark extensions in rank order
pub fn extensions() -> Vec<Extension> {
    vec![
        link::extension(),
        bold::extension(),
        italic::extension(),
        strike::extension(),
        code::extension(),
    ]
}

/// Apply an attribute-less mark to every inline child
fn apply_mark(
    name: &str,
    schema: &Schema,
    children: Vec<DocNode>,
    _ctx: &ConversionContext,
) -> Result<Vec<DocNode>, ConvertError> {
    let mark = schema.mark(name, Attrs::new())?;
    Ok(mark_inline(schema, children, &mark))
}
