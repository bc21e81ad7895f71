//! A text range bound to the adapter's boundary strategy.

use std::cmp::Ordering;

use edgehtml_a11y_core::{
    Automation, EndPointTransfer, Endpoint, RangeExt, Result, TextRange, TextUnit,
};

use crate::adapter::WebTextAdapter;
use crate::embedded::is_embedded;

/// A position or selection in an EdgeHTML document.
///
/// Moves and expansions go through the adapter's boundary strategy, so on
/// legacy engines they never stop on an empty element boundary.
pub struct WebTextInfo<'a, A: Automation> {
    adapter: &'a WebTextAdapter<A>,
    range: A::Range,
}

impl<'a, A: Automation> WebTextInfo<'a, A> {
    pub(crate) fn new(adapter: &'a WebTextAdapter<A>, range: A::Range) -> Self {
        Self { adapter, range }
    }

    /// Move by `direction` units, or move one endpoint if `endpoint` is given.
    pub fn move_by(
        &mut self,
        unit: TextUnit,
        direction: i32,
        endpoint: Option<Endpoint>,
    ) -> Result<i32> {
        self.move_with(unit, direction, endpoint, true)
    }

    /// Like [`move_by`](Self::move_by) with control over skipping replaced content.
    pub fn move_with(
        &mut self,
        unit: TextUnit,
        direction: i32,
        endpoint: Option<Endpoint>,
        skip_replaced_content: bool,
    ) -> Result<i32> {
        self.adapter.move_range(
            &mut self.range,
            unit,
            direction,
            endpoint,
            skip_replaced_content,
        )
    }

    /// Expand to the enclosing unit.
    pub fn expand(&mut self, unit: TextUnit) -> Result<()> {
        self.adapter.expand(&mut self.range, unit)
    }

    /// An independent copy.
    pub fn copy(&self) -> Result<Self> {
        Ok(Self::new(self.adapter, self.range.clone_range()?))
    }

    /// Collapse onto one endpoint.
    pub fn collapse(&mut self, onto: Endpoint) -> Result<()> {
        self.range.collapse(onto)
    }

    /// Move one endpoint onto an endpoint of `other`.
    pub fn set_end_point(&mut self, other: &Self, which: EndPointTransfer) -> Result<()> {
        self.range.set_end_point(&other.range, which)
    }

    /// Compare an endpoint of this position with an endpoint of `other`.
    pub fn compare_end_points(
        &self,
        other: &Self,
        which: EndPointTransfer,
    ) -> Result<Ordering> {
        let (own, theirs) = which.endpoints();
        self.range.compare_endpoints(own, &other.range, theirs)
    }

    pub fn is_collapsed(&self) -> Result<bool> {
        self.range.is_collapsed()
    }

    /// Plain text.
    pub fn text(&self) -> Result<String> {
        self.range.text(None)
    }

    /// Whether this position is on an embedded object.
    pub fn has_embedded(&self) -> Result<bool> {
        is_embedded(self.adapter.automation(), &self.range)
    }

    pub fn range(&self) -> &A::Range {
        &self.range
    }

    pub fn into_range(self) -> A::Range {
        self.range
    }
}

impl<A: Automation> std::fmt::Debug for WebTextInfo<'_, A>
where
    A::Range: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebTextInfo")
            .field("range", &self.range)
            .finish_non_exhaustive()
    }
}
