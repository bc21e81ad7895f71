//! Shared helpers for the adapter integration tests.

#![allow(dead_code)]

use edgehtml_a11y::{Result, TextItem};
use tracing_subscriber::EnvFilter;

/// Install a test subscriber once; `RUST_LOG=edgehtml_a11y=trace` shows the walk.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Collect a field sequence, failing the test on the first error.
pub fn collect(items: impl Iterator<Item = Result<TextItem>>) -> Vec<TextItem> {
    items.map(|item| item.expect("field item")).collect()
}

fn label(item: &TextItem) -> String {
    let name = |field: &edgehtml_a11y::ControlField| {
        field
            .name
            .clone()
            .unwrap_or_else(|| format!("{:?}", field.control_type))
    };
    match item {
        TextItem::ControlStart(field) => format!("start:{}", name(field)),
        TextItem::ControlEnd(field) => format!("end:{}", name(field)),
        TextItem::Text(text) => format!("text:{text}"),
    }
}

/// One readable label per item.
pub fn labels(items: &[TextItem]) -> Vec<String> {
    items.iter().map(label).collect()
}

/// Concatenated text content.
pub fn text_of(items: &[TextItem]) -> String {
    items.iter().filter_map(TextItem::text).collect()
}

/// Every start marker is closed by a later end marker for the same element, innermost first.
pub fn assert_well_formed(items: &[TextItem]) {
    let mut open = Vec::new();
    for item in items {
        match item {
            TextItem::ControlStart(field) => open.push(field.runtime_id.clone()),
            TextItem::ControlEnd(field) => {
                let expected = open.pop();
                assert_eq!(
                    expected.as_ref(),
                    Some(&field.runtime_id),
                    "end marker without matching start in {:?}",
                    labels(items)
                );
            }
            TextItem::Text(_) => {}
        }
    }
    assert!(open.is_empty(), "unclosed markers in {:?}", labels(items));
}

/// The start marker of the first field with this name.
pub fn start_field<'a>(items: &'a [TextItem], name: &str) -> &'a edgehtml_a11y::ControlField {
    items
        .iter()
        .find_map(|item| match item {
            TextItem::ControlStart(field) if field.name.as_deref() == Some(name) => Some(field),
            _ => None,
        })
        .unwrap_or_else(|| panic!("no start marker named {name}"))
}
