//! Integration tests for boundary-aware movement.

mod common;

use common::init_tracing;
use edgehtml_a11y::{
    AdapterConfig, EndPointTransfer, Endpoint, RangeExt, TextRange, TextUnit, WebTextAdapter,
};
use edgehtml_a11y_core::mock::{MockAutomation, MockDocument, Node};
use edgehtml_a11y_core::{ControlType, EngineConfig};

fn legacy_config() -> AdapterConfig {
    AdapterConfig {
        engine: EngineConfig {
            os_build: Some(14393),
            legacy_gap: None,
        },
        ..AdapterConfig::default()
    }
}

/// Positions: 0 stop, 1 'a', 2 'b', 3 image, 4 stop, 5 'c', 6 'd'.
fn page() -> Node {
    Node::new(ControlType::Pane).named("root").children([
        Node::paragraph("ab").named("first"),
        Node::new(ControlType::Group)
            .named("figure")
            .child(Node::image("logo")),
        Node::paragraph("cd").named("second"),
    ])
}

fn legacy_adapter(root: Node) -> WebTextAdapter<MockAutomation> {
    init_tracing();
    WebTextAdapter::new(
        MockAutomation::new(MockDocument::with_boundary_stops(root)),
        legacy_config(),
    )
}

#[test]
fn test_forward_moves_never_land_on_empty_stops() {
    let adapter = legacy_adapter(page());
    let doc = adapter.automation().document();
    let mut info = adapter.text_info(doc.range(1, 1));
    let mut landed = Vec::new();

    while info.move_by(TextUnit::Character, 1, None).unwrap() != 0 {
        let (position, _) = info.range().span();
        landed.push(position);
        if position < doc.len() {
            let next = doc.range(position, position + 1);
            assert!(
                next.has_text().unwrap() || adapter.is_embedded(&next).unwrap(),
                "landed on empty stop at {position}"
            );
        }
    }
    assert_eq!(landed, vec![2, 3, 5, 6, 7]);
}

#[test]
fn test_standard_strategy_reports_stops() {
    init_tracing();
    let adapter = WebTextAdapter::new(
        MockAutomation::new(MockDocument::with_boundary_stops(page())),
        AdapterConfig::default(),
    );
    let doc = adapter.automation().document();
    let mut info = adapter.text_info(doc.range(3, 3));
    assert_eq!(info.move_by(TextUnit::Character, 1, None).unwrap(), 1);
    assert_eq!(info.range().span(), (4, 4));
    assert!(!doc.range(4, 5).has_text().unwrap());
}

#[test]
fn test_backward_move_within_text() {
    let adapter = legacy_adapter(page());
    let doc = adapter.automation().document();
    let mut info = adapter.text_info(doc.range(6, 6));
    assert_eq!(info.move_by(TextUnit::Character, -1, None).unwrap(), -1);
    assert_eq!(info.range().span(), (5, 5));
}

#[test]
fn test_block_moves_are_not_adjusted() {
    let adapter = legacy_adapter(Node::new(ControlType::Pane).children([
        Node::paragraph("ab"),
        Node::paragraph("cd"),
    ]));
    let doc = adapter.automation().document();
    let mut info = adapter.text_info(doc.range(1, 1));
    assert_eq!(info.move_by(TextUnit::Paragraph, 1, None).unwrap(), 1);
    assert_eq!(info.range().span(), (3, 3));
}

#[test]
fn test_expand_covers_embedded_object() {
    let adapter = legacy_adapter(Node::new(ControlType::Pane).children([
        Node::paragraph("ab"),
        Node::new(ControlType::Group)
            .named("gallery")
            .children([Node::image("left"), Node::image("right")]),
    ]));
    let doc = adapter.automation().document();
    let (left_start, left_end) = doc.span(doc.find("left").unwrap());

    for unit in [TextUnit::Character, TextUnit::Word] {
        let mut info = adapter.text_info(doc.range(left_start, left_start));
        info.expand(unit).unwrap();
        let (start, end) = info.range().span();
        assert_eq!(start, left_start);
        assert!(end >= left_end, "{unit:?} expansion split the object");
        assert!(info.has_embedded().unwrap());
    }
}

#[test]
fn test_expand_on_text_uses_standard_expansion() {
    let adapter = legacy_adapter(page());
    let doc = adapter.automation().document();
    let mut info = adapter.text_info(doc.range(1, 1));
    info.expand(TextUnit::Character).unwrap();
    assert_eq!(info.range().span(), (1, 2));
    assert_eq!(info.text().unwrap(), "a");
}

#[test]
fn test_no_children_is_not_embedded() {
    let adapter = legacy_adapter(page());
    let doc = adapter.automation().document();
    assert!(doc.range(3, 3).children().unwrap().is_empty());
    assert!(!adapter.is_embedded(&doc.range(3, 3)).unwrap());
    assert!(adapter.is_embedded(&doc.range(3, 4)).unwrap());
}

#[test]
fn test_endpoint_move_leaves_other_endpoint() {
    let adapter = legacy_adapter(page());
    let doc = adapter.automation().document();
    let mut info = adapter.text_info(doc.range(1, 1));
    assert_eq!(
        info.move_by(TextUnit::Character, 2, Some(Endpoint::End)).unwrap(),
        2
    );
    assert_eq!(info.range().span(), (1, 3));

    let mut end = info.copy().unwrap();
    end.collapse(Endpoint::End).unwrap();
    assert_eq!(
        end.compare_end_points(&info, EndPointTransfer::StartToEnd).unwrap(),
        std::cmp::Ordering::Equal
    );
    assert!(end.is_collapsed().unwrap());
}

#[test]
fn test_endpoint_move_without_movement() {
    let adapter = legacy_adapter(page());
    let doc = adapter.automation().document();
    let mut info = adapter.text_info(doc.range(7, 7));
    assert_eq!(
        info.move_by(TextUnit::Character, 1, Some(Endpoint::End)).unwrap(),
        0
    );
    assert_eq!(info.range().span(), (7, 7));
}

#[test]
fn test_element_range_is_normalized() {
    let adapter = legacy_adapter(page());
    let doc = adapter.automation().document();
    let second = adapter
        .element_range(&doc.find("second").unwrap())
        .unwrap()
        .unwrap();
    assert_eq!(second.span(), (5, 7));
    let figure = adapter
        .element_range(&doc.find("figure").unwrap())
        .unwrap()
        .unwrap();
    assert_eq!(figure.span(), (3, 4));
}
