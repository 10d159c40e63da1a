//! `table`, `tableRow`, `tableHeader` and `tableCell` ↔ table, tableRow, tableCell
//!
//! Document cells hold paragraphs while markdown cells hold a single line of
//! inline content. Paragraphs of a cell are joined with breaks on the way to
//! mdast, and a cell's inline content is split on breaks on the way back.
//! Cells of the first row become header cells. Column alignment is stored
//! on every cell.

use crate::context::ConversionContext;
use crate::document::{Attrs, DocNode};
use crate::error::ConvertError;
use crate::registry::{Extension, Subject, TransformEntry};
use crate::schema::{NodeSpec, Schema};
use mdoc_mdast::{Align, Node as MdNode};
use serde_json::Value;

pub fn extensions() -> Vec<Extension> {
    vec![
        Extension::node(
            NodeSpec::block("table"),
            TransformEntry::new("table")
                .with_to_markdown(table_to_markdown)
                .with_from_markdown(table_from_markdown),
        ),
        Extension::node(
            NodeSpec::block("tableRow"),
            TransformEntry::new("tableRow")
                .with_to_markdown(row_to_markdown)
                .with_from_markdown(row_from_markdown),
        ),
        Extension::node(
            NodeSpec::block("tableCell").attr("align", Value::Null),
            TransformEntry::new("tableCell")
                .with_to_markdown(cell_to_markdown)
                .with_from_markdown(cell_from_markdown),
        ),
        Extension::node(
            NodeSpec::block("tableHeader").attr("align", Value::Null),
            TransformEntry::new("tableHeader")
                .with_alias("tableCell")
                .with_to_markdown(cell_to_markdown),
        ),
    ]
}

fn align_name(align: Option<Align>) -> Value {
    match align {
        Some(Align::Left) => Value::from("left"),
        Some(Align::Center) => Value::from("center"),
        Some(Align::Right) => Value::from("right"),
        None => Value::Null,
    }
}

fn parse_align(name: Option<&str>) -> Option<Align> {
    match name? {
        "left" => Some(Align::Left),
        "center" => Some(Align::Center),
        "right" => Some(Align::Right),
        _ => None,
    }
}

fn table_to_markdown(subject: Subject<'_>, children: Vec<MdNode>) -> Vec<MdNode> {
    let align = subject
        .node()
        .and_then(|table| table.content.first())
        .map(|row| {
            row.content
                .iter()
                .map(|cell| parse_align(cell.attr_str("align")))
                .collect()
        })
        .unwrap_or_default();
    vec![MdNode::table(align, children)]
}

fn table_from_markdown(
    node: &MdNode,
    schema: &Schema,
    mut children: Vec<DocNode>,
    _: &ConversionContext,
) -> Result<Vec<DocNode>, ConvertError> {
    if let MdNode::Table(table) = node {
        for row in &mut children {
            for (i, cell) in row.content.iter_mut().enumerate() {
                let align = table.align.get(i).copied().flatten();
                cell.attrs.insert("align".to_string(), align_name(align));
            }
        }
    }
    Ok(vec![schema.node("table", Attrs::new(), children)?])
}

fn row_to_markdown(_: Subject<'_>, children: Vec<MdNode>) -> Vec<MdNode> {
    vec![MdNode::table_row(children)]
}

fn row_from_markdown(
    _: &MdNode,
    schema: &Schema,
    children: Vec<DocNode>,
    _: &ConversionContext,
) -> Result<Vec<DocNode>, ConvertError> {
    Ok(vec![schema.node("tableRow", Attrs::new(), children)?])
}

/// Join the cell's blocks into one line of inline content
fn cell_to_markdown(_: Subject<'_>, children: Vec<MdNode>) -> Vec<MdNode> {
    let mut inline = Vec::new();
    for block in children {
        if !inline.is_empty() {
            inline.push(MdNode::line_break());
        }
        match block {
            MdNode::Paragraph(p) => inline.extend(p.children),
            other if other.is_inline() => inline.push(other),
            mut other => {
                if let Some(children) = other.children_mut() {
                    inline.extend(std::mem::take(children));
                }
            }
        }
    }
    vec![MdNode::table_cell(inline)]
}

fn cell_from_markdown(
    _: &MdNode,
    schema: &Schema,
    children: Vec<DocNode>,
    ctx: &ConversionContext,
) -> Result<Vec<DocNode>, ConvertError> {
    let is_header = ctx
        .ancestor(1)
        .is_some_and(|row| row.kind == "tableRow" && row.index == 0);
    let cell_type = if is_header { "tableHeader" } else { "tableCell" };

    let mut paragraphs = Vec::new();
    let mut current = Vec::new();
    for child in children {
        if child.node_type == "hardBreak" {
            paragraphs.push(schema.node("paragraph", Attrs::new(), std::mem::take(&mut current))?);
        } else {
            current.push(child);
        }
    }
    paragraphs.push(schema.node("paragraph", Attrs::new(), current)?);

    Ok(vec![schema.node(cell_type, Attrs::new(), paragraphs)?])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_to_markdown_joins_paragraphs() {
        let cell = DocNode {
            node_type: "tableCell".to_string(),
            attrs: Attrs::new(),
            content: vec![],
            marks: vec![],
            text: None,
        };
        let out = cell_to_markdown(
            Subject::Node(&cell),
            vec![
                MdNode::paragraph(vec![MdNode::text("a")]),
                MdNode::paragraph(vec![MdNode::text("b")]),
            ],
        );
        assert_eq!(
            out,
            vec![MdNode::table_cell(vec![
                MdNode::text("a"),
                MdNode::line_break(),
                MdNode::text("b"),
            ])]
        );
    }

    #[test]
    fn test_align_names() {
        for align in [Some(Align::Left), Some(Align::Center), Some(Align::Right), None] {
            assert_eq!(parse_align(align_name(align).as_str()), align);
        }
    }
}
