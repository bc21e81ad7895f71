//! Heading classification and quick navigation.
//!
//! EdgeHTML exposes every heading as a text element with a level property,
//! which makes them cheap to find. The level property follows the markup
//! structure, though, and ARIA can give a heading a different semantic level.
//! The level that counts is the one in the style id text attribute, so the
//! search matches all six structural levels and each candidate is checked
//! against its style.

use std::cell::OnceCell;
use std::cmp::Ordering;

use edgehtml_a11y_core::ids::{STYLE_ID_HEADING1, STYLE_ID_HEADING6};
use edgehtml_a11y_core::logging::{span_names, targets};
use edgehtml_a11y_core::{
    Automation, Condition, ControlType, Direction, Endpoint, Error, PropertyId, PropertyValue,
    Result, TextAttributeId, TextRange,
};

use crate::adapter::WebTextAdapter;

/// Heading level for a `StyleId` attribute value, if it is a heading style.
pub fn heading_level_from_style(style_id: i32) -> Option<u8> {
    (STYLE_ID_HEADING1..=STYLE_ID_HEADING6)
        .contains(&style_id)
        .then(|| (style_id - STYLE_ID_HEADING1 + 1) as u8)
}

/// A heading found by quick navigation.
#[derive(Debug)]
pub struct HeadingQuickNavItem<R: TextRange> {
    element: R::Element,
    range: R,
    level: OnceCell<Option<u8>>,
}

impl<R: TextRange> HeadingQuickNavItem<R> {
    pub fn new(element: R::Element, range: R) -> Self {
        Self {
            element,
            range,
            level: OnceCell::new(),
        }
    }

    /// Heading level from the style attribute, read once.
    ///
    /// `None` when the text is not styled as a heading. A failed read is not
    /// remembered.
    pub fn level(&self) -> Result<Option<u8>> {
        if let Some(level) = self.level.get() {
            return Ok(*level);
        }
        let level = self
            .range
            .attribute_value(TextAttributeId::STYLE_ID)?
            .as_int()
            .and_then(heading_level_from_style);
        Ok(*self.level.get_or_init(|| level))
    }

    /// Whether this heading nests under `parent`: its level is deeper.
    pub fn is_child(&self, parent: &Self) -> Result<bool> {
        Ok(match (self.level()?, parent.level()?) {
            (Some(own), Some(theirs)) => own > theirs,
            _ => false,
        })
    }

    pub fn element(&self) -> &R::Element {
        &self.element
    }

    pub fn range(&self) -> &R {
        &self.range
    }

    pub fn into_range(self) -> R {
        self.range
    }
}

/// Which headings a search accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeadingSelector {
    Any,
    Level(u8),
}

impl HeadingSelector {
    /// Parse a quick-nav node type: `heading` or `heading1` to `heading6`.
    pub fn from_node_type(node_type: &str) -> Result<Self> {
        let unknown = || Error::UnknownNodeType(node_type.to_string());
        let suffix = node_type.strip_prefix("heading").ok_or_else(unknown)?;
        if suffix.is_empty() {
            return Ok(Self::Any);
        }
        match suffix.parse::<u8>() {
            Ok(level @ 1..=6) => Ok(Self::Level(level)),
            _ => Err(unknown()),
        }
    }

    pub fn matches(self, level: u8) -> bool {
        match self {
            Self::Any => true,
            Self::Level(wanted) => wanted == level,
        }
    }
}

/// Search condition for heading candidates: text elements at any level 1 to 6.
pub fn heading_condition() -> Condition {
    Condition::multi_property([
        (
            PropertyId::CONTROL_TYPE,
            vec![PropertyValue::Int(ControlType::Text.id())],
        ),
        (
            PropertyId::LEVEL,
            (1..=6).map(PropertyValue::Int).collect(),
        ),
    ])
}

/// Headings of a document, from a position in one direction.
///
/// Candidates are fetched when the iterator is created. Each one is checked
/// lazily as the iterator advances.
pub struct HeadingIterator<'a, A: Automation> {
    adapter: &'a WebTextAdapter<A>,
    candidates: std::vec::IntoIter<A::Element>,
    selector: HeadingSelector,
    direction: Direction,
    position: Option<A::Range>,
}

impl<'a, A: Automation> HeadingIterator<'a, A> {
    pub(crate) fn new(
        adapter: &'a WebTextAdapter<A>,
        document_root: &A::Element,
        selector: HeadingSelector,
        direction: Direction,
        position: Option<A::Range>,
    ) -> Result<Self> {
        let _span =
            tracing::debug_span!(target: targets::HEADINGS, span_names::HEADING_SEARCH, ?selector, ?direction)
                .entered();
        let mut candidates = adapter
            .automation()
            .find_all(document_root, &heading_condition())?;
        if direction == Direction::Previous {
            candidates.reverse();
        }
        tracing::debug!(target: targets::HEADINGS, count = candidates.len(), "heading candidates");
        Ok(Self {
            adapter,
            candidates: candidates.into_iter(),
            selector,
            direction,
            position,
        })
    }

    fn admit(&self, element: A::Element) -> Result<Option<HeadingQuickNavItem<A::Range>>> {
        let Some(range) = self.adapter.element_range(&element)? else {
            return Ok(None);
        };
        if let Some(position) = &self.position {
            let beyond = match self.direction {
                Direction::Next => {
                    range.compare_endpoints(Endpoint::Start, position, Endpoint::Start)?
                        == Ordering::Greater
                }
                Direction::Previous => {
                    range.compare_endpoints(Endpoint::End, position, Endpoint::Start)?
                        != Ordering::Greater
                }
            };
            if !beyond {
                return Ok(None);
            }
        }
        let item = HeadingQuickNavItem::new(element, range);
        match item.level()? {
            Some(level) if self.selector.matches(level) => Ok(Some(item)),
            level => {
                tracing::trace!(target: targets::HEADINGS, ?level, "skipping heading candidate");
                Ok(None)
            }
        }
    }
}

impl<A: Automation> Iterator for HeadingIterator<'_, A> {
    type Item = Result<HeadingQuickNavItem<A::Range>>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(element) = self.candidates.next() {
            match self.admit(element) {
                Ok(Some(item)) => return Some(Ok(item)),
                Ok(None) => {}
                Err(err) => {
                    self.candidates = Vec::new().into_iter();
                    return Some(Err(err));
                }
            }
        }
        None
    }
}
