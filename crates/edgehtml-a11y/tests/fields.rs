//! Integration tests for unbalanced field building.

mod common;

use common::{assert_well_formed, collect, init_tracing, labels, start_field, text_of};
use edgehtml_a11y::{AdapterConfig, Clipping, FieldRequest, TextItem, TextRange, WebTextAdapter};
use edgehtml_a11y_core::ids::STYLE_ID_HEADING1;
use edgehtml_a11y_core::{ControlType, FieldValue};
use edgehtml_a11y_core::mock::{MockAutomation, MockDocument, Node};

fn page() -> Node {
    Node::new(ControlType::Pane).named("root").children([
        Node::paragraph("Hello").named("p1"),
        Node::new(ControlType::Group)
            .named("p2")
            .child(Node::image("logo")),
        Node::paragraph("World").named("p3"),
    ])
}

fn adapter(root: Node) -> WebTextAdapter<MockAutomation> {
    init_tracing();
    WebTextAdapter::new(
        MockAutomation::new(MockDocument::new(root)),
        AdapterConfig::default(),
    )
}

#[test]
fn test_paragraphs_around_image() {
    let adapter = adapter(page());
    let doc = adapter.automation().document();
    let items = collect(adapter.build_fields(doc.root(), doc.document_range(), FieldRequest::default()));

    assert_eq!(
        labels(&items),
        vec![
            "start:root",
            "start:p1",
            "text:Hello",
            "end:p1",
            "start:p2",
            "start:logo",
            "end:logo",
            "end:p2",
            "start:p3",
            "text:World",
            "end:p3",
            "end:root",
        ]
    );
    assert_eq!(start_field(&items, "logo").clipping(), Clipping::NONE);
    assert_eq!(text_of(&items), "HelloWorld");
    assert_eq!(text_of(&items), doc.document_range().text(None).unwrap());
}

#[test]
fn test_partial_range_is_clipped() {
    let adapter = adapter(page());
    let doc = adapter.automation().document();
    let range = doc.range(2, 9);
    let items = collect(adapter.build_fields(doc.root(), range.clone(), FieldRequest::default()));

    assert_well_formed(&items);
    assert_eq!(text_of(&items), "lloWor");
    assert_eq!(text_of(&items), range.text(None).unwrap());
    assert_eq!(start_field(&items, "root").clipping(), Clipping::BOTH);
    assert_eq!(
        start_field(&items, "p1").clipping(),
        Clipping {
            start: true,
            end: false
        }
    );
    assert_eq!(start_field(&items, "p2").clipping(), Clipping::NONE);
    assert_eq!(
        start_field(&items, "p3").clipping(),
        Clipping {
            start: false,
            end: true
        }
    );
}

#[test]
fn test_end_marker_matches_start_marker() {
    let adapter = adapter(page());
    let doc = adapter.automation().document();
    let items = collect(adapter.build_fields(doc.root(), doc.range(2, 9), FieldRequest::default()));
    let root_end = items
        .iter()
        .rev()
        .find_map(|item| match item {
            TextItem::ControlEnd(field) if field.name.as_deref() == Some("root") => Some(field),
            _ => None,
        })
        .unwrap();
    assert_eq!(root_end, start_field(&items, "root"));
}

#[test]
fn test_nested_list() {
    let adapter = adapter(
        Node::new(ControlType::Pane).named("root").children([
            Node::new(ControlType::List).named("list").children([
                Node::text(ControlType::ListItem, "one").named("one"),
                Node::text(ControlType::ListItem, "two").named("two"),
            ]),
            Node::paragraph("after").named("after"),
        ]),
    );
    let doc = adapter.automation().document();
    let items = collect(adapter.build_fields(doc.root(), doc.document_range(), FieldRequest::default()));

    assert_eq!(
        labels(&items),
        vec![
            "start:root",
            "start:list",
            "start:one",
            "text:one",
            "end:one",
            "start:two",
            "text:two",
            "end:two",
            "end:list",
            "start:after",
            "text:after",
            "end:after",
            "end:root",
        ]
    );
    assert_well_formed(&items);
}

#[test]
fn test_range_starting_deep_inside() {
    let adapter = adapter(
        Node::new(ControlType::Pane).named("root").children([
            Node::new(ControlType::Group).named("section").children([
                Node::new(ControlType::List).named("list").children([
                    Node::text(ControlType::ListItem, "alpha").named("alpha"),
                    Node::text(ControlType::ListItem, "beta").named("beta"),
                ]),
                Node::paragraph("gamma").named("gamma"),
            ]),
            Node::paragraph("delta").named("delta"),
        ]),
    );
    let doc = adapter.automation().document();
    let range = doc.range(3, 16);
    let items = collect(adapter.build_fields(doc.root(), range.clone(), FieldRequest::default()));

    assert_well_formed(&items);
    assert_eq!(text_of(&items), "habetagammade");
    assert_eq!(text_of(&items), range.text(None).unwrap());
    let section = start_field(&items, "section");
    assert!(section.clipped_at_start);
    assert!(!section.clipped_at_end);
    assert!(start_field(&items, "delta").clipped_at_end);
}

#[test]
fn test_without_root_markers() {
    let adapter = adapter(page());
    let doc = adapter.automation().document();
    let request = FieldRequest {
        include_root: false,
        ..FieldRequest::default()
    };
    let items = collect(adapter.build_fields(doc.root(), doc.document_range(), request));

    assert_well_formed(&items);
    assert!(!labels(&items).iter().any(|label| label.ends_with(":root")));
    assert_eq!(text_of(&items), "HelloWorld");
}

#[test]
fn test_missing_field_truncates_ancestors() {
    let adapter = adapter(
        Node::new(ControlType::Pane).named("root").children([
            Node::new(ControlType::Group)
                .named("section")
                .without_field()
                .child(Node::paragraph("abc").named("inner")),
            Node::paragraph("def").named("outer"),
        ]),
    );
    let doc = adapter.automation().document();
    let items = collect(adapter.build_fields(doc.root(), doc.document_range(), FieldRequest::default()));

    assert_eq!(labels(&items), vec!["start:inner", "text:abc", "end:inner"]);
}

#[test]
fn test_communication_failure_surfaces_once() {
    let adapter = adapter(
        Node::new(ControlType::Pane)
            .named("root")
            .child(Node::paragraph("abc").named("gone").detached()),
    );
    let doc = adapter.automation().document();
    let mut cursor = adapter.build_fields(doc.root(), doc.document_range(), FieldRequest::default());

    let err = cursor.next().unwrap().unwrap_err();
    assert!(err.is_communication());
    assert!(cursor.next().is_none());
}

#[test]
fn test_without_recursion_uses_balanced_extraction() {
    let adapter = adapter(page());
    let doc = adapter.automation().document();
    let request = FieldRequest {
        recurse_children: false,
        ..FieldRequest::default()
    };
    let items = collect(adapter.build_fields(doc.root(), doc.document_range(), request));

    assert_eq!(labels(&items), vec!["start:root", "text:HelloWorld", "end:root"]);
    assert_eq!(start_field(&items, "root").clipping(), Clipping::BOTH);
    assert_eq!(adapter.automation().balanced_calls(), 1);
}

#[test]
fn test_root_as_single_embedded_child() {
    let adapter = adapter(
        Node::new(ControlType::Pane)
            .named("root")
            .children([Node::paragraph("Hello"), Node::image("logo")]),
    );
    let doc = adapter.automation().document();
    let logo = doc.find("logo").unwrap();
    let items = collect(adapter.build_fields(logo, doc.element_range(logo), FieldRequest::default()));

    assert_eq!(labels(&items), vec!["start:logo", "end:logo"]);
    assert_eq!(adapter.automation().balanced_calls(), 1);
}

#[test]
fn test_legacy_engine_produces_same_content() {
    init_tracing();
    let config = AdapterConfig::from_toml_str("[engine]\nos_build = 14393").unwrap();
    let adapter = WebTextAdapter::new(
        MockAutomation::new(MockDocument::with_boundary_stops(page())),
        config,
    );
    let doc = adapter.automation().document();
    let items = collect(adapter.build_fields(doc.root(), doc.document_range(), FieldRequest::default()));

    assert_well_formed(&items);
    assert_eq!(text_of(&items), "HelloWorld");
    assert_eq!(start_field(&items, "logo").clipping(), Clipping::NONE);
}

#[test]
fn test_every_range_is_well_formed_and_complete() {
    init_tracing();
    let legacy = AdapterConfig::from_toml_str("[engine]\nos_build = 14393").unwrap();
    let adapters = [
        WebTextAdapter::new(
            MockAutomation::new(MockDocument::new(page())),
            AdapterConfig::default(),
        ),
        WebTextAdapter::new(
            MockAutomation::new(MockDocument::with_boundary_stops(page())),
            legacy,
        ),
    ];

    for adapter in &adapters {
        let doc = adapter.automation().document();
        for include_root in [true, false] {
            let request = FieldRequest {
                include_root,
                ..FieldRequest::default()
            };
            for start in 0..=doc.len() {
                for end in start..=doc.len() {
                    let range = doc.range(start, end);
                    let items = collect(adapter.build_fields(doc.root(), range.clone(), request));
                    assert_well_formed(&items);
                    assert_eq!(
                        text_of(&items),
                        range.text(None).unwrap(),
                        "range {start}..{end}, include_root {include_root}"
                    );
                }
            }
        }
    }
}

#[test]
fn test_fields_carry_style_extra() {
    let adapter = adapter(
        Node::new(ControlType::Pane).named("root").children([
            Node::heading(2, "Title").named("title"),
            Node::paragraph("body").named("body"),
        ]),
    );
    let doc = adapter.automation().document();
    let items = collect(adapter.build_fields(doc.root(), doc.document_range(), FieldRequest::default()));

    let title = start_field(&items, "title");
    assert_eq!(
        title.extras.get("styleId"),
        Some(&FieldValue::Int(i64::from(STYLE_ID_HEADING1 + 1)))
    );
    assert_eq!(title.level, Some(2));
    assert!(start_field(&items, "body").extras.is_empty());
}
