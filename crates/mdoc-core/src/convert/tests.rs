use super::*;
use crate::extensions::nodes::paragraph;
use crate::parser::parse;
use mdoc_mdast::{Align, CalloutKind};
use serde_json::{Value, json};

fn doc(value: Value) -> DocNode {
    serde_json::from_value(value).unwrap()
}

fn text(value: &str) -> Value {
    json!({ "type": "text", "text": value })
}

fn marked(value: &str, marks: Value) -> Value {
    json!({ "type": "text", "text": value, "marks": marks })
}

fn paragraph_of(content: Vec<Value>) -> Value {
    json!({ "type": "paragraph", "content": content })
}

/// Document → mdast → document
fn round_trip(registry: &Registry, document: &DocNode) -> DocNode {
    let converter = Converter::new(registry);
    let root = converter.to_markdown_ast(document);
    converter.to_document(root).unwrap()
}

#[test]
fn test_markdown_to_document_shape() {
    let registry = Registry::default();
    let root = parse("## Title\n\nSome **bold** text\n");
    let document = Converter::new(&registry).to_document(root).unwrap();

    assert_eq!(
        serde_json::to_value(&document).unwrap(),
        json!({
            "type": "doc",
            "content": [
                { "type": "heading", "attrs": { "level": 2 }, "content": [text("Title")] },
                paragraph_of(vec![
                    text("Some "),
                    marked("bold", json!([{ "type": "bold" }])),
                    text(" text"),
                ]),
            ]
        })
    );
}

#[test]
fn test_heading_levels_round_trip() {
    let registry = Registry::default();
    for level in 1..=6 {
        let document = doc(json!({
            "type": "doc",
            "content": [{ "type": "heading", "attrs": { "level": level }, "content": [text("Title")] }]
        }));
        assert_eq!(round_trip(&registry, &document), document);
    }
}

#[test]
fn test_heading_level_is_clamped() {
    let registry = Registry::default();
    let document = doc(json!({
        "type": "doc",
        "content": [{ "type": "heading", "attrs": { "level": 9 }, "content": [text("x")] }]
    }));
    let root = Converter::new(&registry).to_markdown_ast(&document);
    assert_eq!(root.children, vec![MdNode::heading(6, vec![MdNode::text("x")])]);
}

#[test]
fn test_break_in_heading_becomes_space() {
    let registry = Registry::default();
    let converter = Converter::new(&registry);

    let document = doc(json!({
        "type": "doc",
        "content": [{
            "type": "heading",
            "attrs": { "level": 1 },
            "content": [text("a"), { "type": "hardBreak" }, text("b")]
        }]
    }));
    let root = converter.to_markdown_ast(&document);
    assert_eq!(root.children, vec![MdNode::heading(1, vec![MdNode::text("a b")])]);

    let root = Root::new(vec![MdNode::heading(
        3,
        vec![MdNode::text("a"), MdNode::line_break(), MdNode::text("b")],
    )]);
    let document = converter.to_document(root).unwrap();
    assert_eq!(
        serde_json::to_value(&document.content[0]).unwrap(),
        json!({ "type": "heading", "attrs": { "level": 3 }, "content": [text("a b")] })
    );
}

#[test]
fn test_shared_marks_wrap_once() {
    let registry = Registry::default();
    let document = doc(json!({
        "type": "doc",
        "content": [paragraph_of(vec![
            marked("a", json!([{ "type": "bold" }])),
            marked("b", json!([{ "type": "bold" }, { "type": "italic" }])),
        ])]
    }));
    let root = Converter::new(&registry).to_markdown_ast(&document);
    assert_eq!(
        root.children,
        vec![MdNode::paragraph(vec![MdNode::strong(vec![
            MdNode::text("a"),
            MdNode::emphasis(vec![MdNode::text("b")]),
        ])])]
    );
    assert_eq!(round_trip(&registry, &document), document);
}

#[test]
fn test_continuing_mark_stays_outermost() {
    let registry = Registry::default();
    let document = doc(json!({
        "type": "doc",
        "content": [paragraph_of(vec![
            marked("a", json!([{ "type": "italic" }])),
            marked("b", json!([{ "type": "bold" }, { "type": "italic" }])),
        ])]
    }));
    let root = Converter::new(&registry).to_markdown_ast(&document);
    assert_eq!(
        root.children,
        vec![MdNode::paragraph(vec![MdNode::emphasis(vec![
            MdNode::text("a"),
            MdNode::strong(vec![MdNode::text("b")]),
        ])])]
    );
}

#[test]
fn test_links_with_different_targets_stay_apart() {
    let registry = Registry::default();
    let document = doc(json!({
        "type": "doc",
        "content": [paragraph_of(vec![
            marked("one", json!([{ "type": "link", "attrs": { "href": "a", "title": null } }])),
            marked("two", json!([{ "type": "link", "attrs": { "href": "b", "title": "B" } }])),
        ])]
    }));
    let root = Converter::new(&registry).to_markdown_ast(&document);
    assert_eq!(
        root.children,
        vec![MdNode::paragraph(vec![
            MdNode::link("a", vec![MdNode::text("one")]),
            MdNode::link_with_title("b", "B", vec![MdNode::text("two")]),
        ])]
    );
    assert_eq!(round_trip(&registry, &document), document);
}

#[test]
fn test_inline_code_mark() {
    let registry = Registry::default();
    let root = Root::new(vec![MdNode::paragraph(vec![
        MdNode::text("run "),
        MdNode::strong(vec![MdNode::inline_code("cargo")]),
    ])]);
    let document = Converter::new(&registry).to_document(root.clone()).unwrap();
    assert_eq!(
        serde_json::to_value(&document.content[0]).unwrap(),
        paragraph_of(vec![
            text("run "),
            marked("cargo", json!([{ "type": "bold" }, { "type": "code" }])),
        ])
    );
    assert_eq!(Converter::new(&registry).to_markdown_ast(&document), root);
}

#[test]
fn test_image_and_code_block_round_trip() {
    let registry = Registry::default();
    let document = doc(json!({
        "type": "doc",
        "content": [
            paragraph_of(vec![json!({
                "type": "image",
                "attrs": { "src": "cat.png", "alt": "A cat", "title": null }
            })]),
            {
                "type": "codeBlock",
                "attrs": { "language": "rust" },
                "content": [text("fn main() {}\n// done")]
            },
            { "type": "horizontalRule" },
            { "type": "codeBlock", "attrs": { "language": null } }
        ]
    }));
    assert_eq!(round_trip(&registry, &document), document);
}

#[test]
fn test_lists_round_trip() {
    let registry = Registry::default();
    let item = |value: &str| json!({ "type": "listItem", "content": [paragraph_of(vec![text(value)])] });
    let document = doc(json!({
        "type": "doc",
        "content": [
            { "type": "bulletList", "content": [
                { "type": "listItem", "content": [
                    paragraph_of(vec![text("parent")]),
                    { "type": "orderedList", "attrs": { "start": 3 }, "content": [item("three"), item("four")] }
                ]},
                item("sibling")
            ]},
            { "type": "taskList", "content": [
                { "type": "taskItem", "attrs": { "checked": true }, "content": [paragraph_of(vec![text("done")])] },
                { "type": "taskItem", "attrs": { "checked": false }, "content": [paragraph_of(vec![text("todo")])] }
            ]}
        ]
    }));
    assert_eq!(round_trip(&registry, &document), document);
}

#[test]
fn test_task_list_detection() {
    let registry = Registry::default();
    let root = Root::new(vec![MdNode::list(
        false,
        vec![
            MdNode::task_item(true, vec![MdNode::paragraph(vec![MdNode::text("a")])]),
            MdNode::list_item(vec![MdNode::paragraph(vec![MdNode::text("b")])]),
        ],
    )]);
    let document = Converter::new(&registry).to_document(root).unwrap();
    let list = &document.content[0];
    assert_eq!(list.node_type, "taskList");
    assert_eq!(list.content[0].attr_bool("checked"), Some(true));
    assert_eq!(list.content[1].node_type, "taskItem");
    assert_eq!(list.content[1].attr_bool("checked"), Some(false));
}

#[test]
fn test_empty_list_item_gets_paragraph() {
    let registry = Registry::default();
    let root = Root::new(vec![MdNode::list(false, vec![MdNode::list_item(vec![])])]);
    let document = Converter::new(&registry).to_document(root).unwrap();
    assert_eq!(
        serde_json::to_value(&document.content[0]).unwrap(),
        json!({ "type": "bulletList", "content": [
            { "type": "listItem", "content": [{ "type": "paragraph" }] }
        ]})
    );
}

#[test]
fn test_table_header_and_alignment() {
    let registry = Registry::default();
    let root = Root::new(vec![MdNode::table(
        vec![Some(Align::Left), None],
        vec![
            MdNode::table_row(vec![
                MdNode::table_cell(vec![MdNode::text("A")]),
                MdNode::table_cell(vec![MdNode::text("B")]),
            ]),
            MdNode::table_row(vec![
                MdNode::table_cell(vec![
                    MdNode::text("x"),
                    MdNode::line_break(),
                    MdNode::text("y"),
                ]),
                MdNode::table_cell(vec![]),
            ]),
        ],
    )]);
    let converter = Converter::new(&registry);
    let document = converter.to_document(root.clone()).unwrap();

    assert_eq!(
        serde_json::to_value(&document.content[0]).unwrap(),
        json!({ "type": "table", "content": [
            { "type": "tableRow", "content": [
                { "type": "tableHeader", "attrs": { "align": "left" }, "content": [paragraph_of(vec![text("A")])] },
                { "type": "tableHeader", "attrs": { "align": null }, "content": [paragraph_of(vec![text("B")])] }
            ]},
            { "type": "tableRow", "content": [
                { "type": "tableCell", "attrs": { "align": "left" }, "content": [
                    paragraph_of(vec![text("x")]),
                    paragraph_of(vec![text("y")])
                ]},
                { "type": "tableCell", "attrs": { "align": null }, "content": [{ "type": "paragraph" }] }
            ]}
        ]})
    );

    assert_eq!(converter.to_markdown_ast(&document), root);
}

#[test]
fn test_callout_round_trip() {
    let registry = Registry::default();
    let root = Root::new(vec![MdNode::callout(
        CalloutKind::Warning,
        vec![MdNode::paragraph(vec![MdNode::text(" be careful")])],
    )]);
    let converter = Converter::new(&registry);
    let document = converter.to_document(root.clone()).unwrap();
    assert_eq!(document.content[0].node_type, "callout");
    assert_eq!(document.content[0].attr_str("kind"), Some("warning"));
    assert_eq!(converter.to_markdown_ast(&document), root);
}

#[test]
fn test_blockquote_round_trip() {
    let registry = Registry::default();
    let document = doc(json!({
        "type": "doc",
        "content": [{ "type": "blockquote", "content": [
            paragraph_of(vec![text("quoted"), json!({ "type": "hardBreak" }), text("line")])
        ]}]
    }));
    assert_eq!(round_trip(&registry, &document), document);
}

#[test]
fn test_unhandled_mdast_kind_passes_children() {
    let registry = Registry::default();
    let root = Root::new(vec![
        MdNode::html("<div>"),
        MdNode::paragraph(vec![MdNode::text("kept")]),
    ]);
    let document = Converter::new(&registry).to_document(root).unwrap();
    assert_eq!(document.content.len(), 1);
    assert_eq!(document.content[0].text_content(), "kept");
}

#[test]
fn test_unregistered_document_type_passes_children() {
    let registry = Registry::default();
    let document = doc(json!({
        "type": "doc",
        "content": [{ "type": "details", "content": [paragraph_of(vec![text("inside")])] }]
    }));
    let root = Converter::new(&registry).to_markdown_ast(&document);
    assert_eq!(root.children, vec![MdNode::paragraph(vec![MdNode::text("inside")])]);
}

#[test]
fn test_hook_for_undeclared_type_fails_on_use() {
    let mut registry = Registry::empty();
    registry.register(paragraph::extension().transform);

    let root = Root::new(vec![MdNode::paragraph(vec![])]);
    let err = Converter::new(&registry).to_document(root).unwrap_err();
    assert_eq!(err, ConvertError::UnknownNodeType("paragraph".to_string()));
}

#[test]
fn test_empty_document() {
    let registry = Registry::default();
    let document = Converter::new(&registry).to_document(Root::default()).unwrap();
    assert_eq!(serde_json::to_value(&document).unwrap(), json!({ "type": "doc" }));
    assert_eq!(Converter::new(&registry).to_markdown_ast(&document), Root::default());
}
