//! The UIA text range primitive and helpers built on it.

use std::cmp::Ordering;
use std::fmt;

use crate::error::Result;
use crate::ids::{AttributeValue, Endpoint, TextAttributeId, TextUnit};

/// A contiguous span of document content, bound to an element scope.
///
/// This is the host's wrapper around `IUIAutomationTextRange`. Every call may
/// cross a process boundary, so every call is fallible. Implementations keep
/// `start <= end`: moving one endpoint past the other drags the other along.
pub trait TextRange: Sized {
    /// Element handle type returned by [`children`](Self::children).
    type Element: Clone + fmt::Debug;

    /// An independent copy of this range.
    fn clone_range(&self) -> Result<Self>;

    /// Compare `endpoint` of this range with `target_endpoint` of `target`.
    fn compare_endpoints(
        &self,
        endpoint: Endpoint,
        target: &Self,
        target_endpoint: Endpoint,
    ) -> Result<Ordering>;

    /// Move `endpoint` of this range to `target_endpoint` of `target`.
    fn move_endpoint_by_range(
        &mut self,
        endpoint: Endpoint,
        target: &Self,
        target_endpoint: Endpoint,
    ) -> Result<()>;

    /// Collapse to the start and move by `count` units. Returns the distance moved.
    fn move_by(&mut self, unit: TextUnit, count: i32) -> Result<i32>;

    /// Move one endpoint by `count` units. Returns the distance moved.
    fn move_endpoint_by_unit(&mut self, endpoint: Endpoint, unit: TextUnit, count: i32)
        -> Result<i32>;

    /// Grow or shrink to the unit containing the start.
    fn expand_to_enclosing_unit(&mut self, unit: TextUnit) -> Result<()>;

    /// Plain text of the range, at most `max_length` characters if given.
    fn text(&self, max_length: Option<usize>) -> Result<String>;

    /// Elements directly enclosed by the range.
    fn children(&self) -> Result<Vec<Self::Element>>;

    /// The deepest element enclosing the range.
    fn enclosing_element(&self) -> Result<Option<Self::Element>>;

    /// Value of a text attribute over the whole range.
    fn attribute_value(&self, attribute: TextAttributeId) -> Result<AttributeValue>;
}

/// Which endpoints [`RangeExt::set_end_point`] connects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndPointTransfer {
    StartToStart,
    StartToEnd,
    EndToStart,
    EndToEnd,
}

impl EndPointTransfer {
    /// `(endpoint of self, endpoint of other)`.
    pub fn endpoints(self) -> (Endpoint, Endpoint) {
        match self {
            Self::StartToStart => (Endpoint::Start, Endpoint::Start),
            Self::StartToEnd => (Endpoint::Start, Endpoint::End),
            Self::EndToStart => (Endpoint::End, Endpoint::Start),
            Self::EndToEnd => (Endpoint::End, Endpoint::End),
        }
    }
}

/// Convenience operations composed from [`TextRange`] primitives.
pub trait RangeExt: TextRange {
    /// Collapse onto one endpoint.
    fn collapse(&mut self, onto: Endpoint) -> Result<()> {
        let point = self.clone_range()?;
        match onto {
            Endpoint::Start => self.move_endpoint_by_range(Endpoint::End, &point, Endpoint::Start),
            Endpoint::End => self.move_endpoint_by_range(Endpoint::Start, &point, Endpoint::End),
        }
    }

    /// Whether the end does not lie after the start.
    fn is_collapsed(&self) -> Result<bool> {
        Ok(self.compare_endpoints(Endpoint::End, self, Endpoint::Start)? != Ordering::Greater)
    }

    /// Move one endpoint of this range onto an endpoint of `other`.
    fn set_end_point(&mut self, other: &Self, which: EndPointTransfer) -> Result<()> {
        let (own, theirs) = which.endpoints();
        self.move_endpoint_by_range(own, other, theirs)
    }

    /// Pull the end back to `bound`'s end if it lies beyond it. Returns whether it did.
    fn clamp_end_to(&mut self, bound: &Self) -> Result<bool> {
        if self.compare_endpoints(Endpoint::End, bound, Endpoint::End)? == Ordering::Greater {
            self.move_endpoint_by_range(Endpoint::End, bound, Endpoint::End)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Whether the text of the range is non-empty.
    fn has_text(&self) -> Result<bool> {
        Ok(!self.text(None)?.is_empty())
    }
}

impl<R: TextRange> RangeExt for R {}
