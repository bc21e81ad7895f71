//! Boundary-aware move and expand.
//!
//! EdgeHTML before build 15048 reports an empty stop at the start of every
//! element. [`LegacyGapBoundaries`] steps over those stops so every position
//! the document engine lands on either carries text or sits on an embedded
//! object. Later engines need nothing special: [`StandardBoundaries`] passes
//! straight through to the range.
//!
//! The strategy is chosen once from [`EngineCapabilities`] by
//! [`select_strategy`] and handed to the adapter.

use edgehtml_a11y_core::logging::{span_names, targets};
use edgehtml_a11y_core::{
    Automation, EndPointTransfer, Endpoint, EngineCapabilities, RangeExt, Result, TextRange,
    TextUnit,
};

use crate::embedded::is_embedded;

/// Move and expand behaviour for one engine generation.
pub trait BoundaryStrategy<A: Automation> {
    /// Short name for logging.
    fn name(&self) -> &'static str;

    /// Move by `direction` units. A positive direction moves forward.
    ///
    /// Without an endpoint the range collapses and moves as a whole. With an
    /// endpoint only that endpoint moves. Returns the distance reported by
    /// the underlying move, 0 if nothing moved.
    fn move_range(
        &self,
        automation: &A,
        range: &mut A::Range,
        unit: TextUnit,
        direction: i32,
        endpoint: Option<Endpoint>,
        skip_replaced_content: bool,
    ) -> Result<i32>;

    /// Expand to the enclosing unit.
    fn expand(&self, automation: &A, range: &mut A::Range, unit: TextUnit) -> Result<()>;

    /// Adjust a range freshly obtained for an element.
    fn normalize_element_range(&self, automation: &A, range: A::Range) -> Result<A::Range> {
        let _ = automation;
        Ok(range)
    }
}

/// Pick the strategy matching the running engine.
pub fn select_strategy<A: Automation>(
    capabilities: EngineCapabilities,
) -> Box<dyn BoundaryStrategy<A>> {
    if capabilities.legacy_gap {
        Box::new(LegacyGapBoundaries)
    } else {
        Box::new(StandardBoundaries)
    }
}

/// Delegates everything to the range.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardBoundaries;

impl<A: Automation> BoundaryStrategy<A> for StandardBoundaries {
    fn name(&self) -> &'static str {
        "standard"
    }

    fn move_range(
        &self,
        automation: &A,
        range: &mut A::Range,
        unit: TextUnit,
        direction: i32,
        endpoint: Option<Endpoint>,
        skip_replaced_content: bool,
    ) -> Result<i32> {
        if direction == 0 {
            return Ok(0);
        }
        match endpoint {
            None => automation.collapsed_move(range, unit, direction, skip_replaced_content),
            Some(endpoint) => range.move_endpoint_by_unit(endpoint, unit, direction),
        }
    }

    fn expand(&self, _automation: &A, range: &mut A::Range, unit: TextUnit) -> Result<()> {
        range.expand_to_enclosing_unit(unit)
    }
}

/// Skips the empty element-start stops of legacy EdgeHTML.
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyGapBoundaries;

/// Whether the position covered by `range` is a real stop.
fn has_content<A: Automation>(automation: &A, range: &A::Range) -> Result<bool> {
    Ok(range.has_text()? || is_embedded(automation, range)?)
}

impl LegacyGapBoundaries {
    /// Advance a collapsed range past empty stops.
    fn skip_forward<A: Automation>(&self, automation: &A, range: &mut A::Range) -> Result<()> {
        let mut probe = range.clone_range()?;
        let mut skipped = 0u32;
        while probe.move_by(TextUnit::Character, 1)? != 0 {
            probe.set_end_point(range, EndPointTransfer::StartToStart)?;
            if has_content(automation, &probe)? {
                break;
            }
            probe.collapse(Endpoint::End)?;
            *range = probe.clone_range()?;
            skipped += 1;
        }
        if skipped > 0 {
            tracing::trace!(target: targets::MOVEMENT, skipped, "skipped empty stops forward");
        }
        Ok(())
    }

    /// Step a collapsed range back until the span from it to `probe`'s end has content.
    fn skip_backward<A: Automation>(
        &self,
        automation: &A,
        range: &mut A::Range,
        mut probe: A::Range,
    ) -> Result<()> {
        loop {
            probe.set_end_point(range, EndPointTransfer::StartToStart)?;
            if has_content(automation, &probe)? {
                return Ok(());
            }
            if range.move_by(TextUnit::Character, -1)? == 0 {
                return Ok(());
            }
        }
    }
}

impl<A: Automation> BoundaryStrategy<A> for LegacyGapBoundaries {
    fn name(&self) -> &'static str {
        "legacy-gap"
    }

    fn move_range(
        &self,
        automation: &A,
        range: &mut A::Range,
        unit: TextUnit,
        direction: i32,
        endpoint: Option<Endpoint>,
        skip_replaced_content: bool,
    ) -> Result<i32> {
        let _span = tracing::trace_span!(target: targets::MOVEMENT, span_names::MOVE, ?unit, direction)
            .entered();
        if direction == 0 {
            return Ok(0);
        }
        if let Some(endpoint) = endpoint {
            let mut scratch = range.clone_range()?;
            let moved = self.move_range(
                automation,
                &mut scratch,
                unit,
                direction,
                None,
                skip_replaced_content,
            )?;
            if moved != 0 {
                let transfer = match endpoint {
                    Endpoint::Start => EndPointTransfer::StartToStart,
                    Endpoint::End => EndPointTransfer::EndToEnd,
                };
                range.set_end_point(&scratch, transfer)?;
            }
            return Ok(moved);
        }
        if direction > 0 {
            let moved =
                automation.collapsed_move(range, unit, direction, skip_replaced_content)?;
            if moved != 0 && !unit.is_block() {
                self.skip_forward(automation, range)?;
            }
            Ok(moved)
        } else {
            let origin = range.clone_range()?;
            let moved =
                automation.collapsed_move(range, unit, direction, skip_replaced_content)?;
            if moved != 0 {
                self.skip_backward(automation, range, origin)?;
            }
            Ok(moved)
        }
    }

    fn expand(&self, automation: &A, range: &mut A::Range, unit: TextUnit) -> Result<()> {
        if unit.is_fine_grained() {
            let mut probe = range.clone_range()?;
            self.move_range(
                automation,
                &mut probe,
                TextUnit::Character,
                1,
                Some(Endpoint::End),
                false,
            )?;
            if is_embedded(automation, &probe)? {
                tracing::trace!(target: targets::MOVEMENT, ?unit, "expanded over embedded object");
                return range.set_end_point(&probe, EndPointTransfer::EndToEnd);
            }
        }
        range.expand_to_enclosing_unit(unit)
    }

    fn normalize_element_range(&self, automation: &A, mut range: A::Range) -> Result<A::Range> {
        let mut probe = range.clone_range()?;
        probe.collapse(Endpoint::Start)?;
        while probe.move_by(TextUnit::Character, 1)? != 0 {
            probe.set_end_point(&range, EndPointTransfer::StartToStart)?;
            if has_content(automation, &probe)? {
                break;
            }
            range.set_end_point(&probe, EndPointTransfer::StartToEnd)?;
            probe.collapse(Endpoint::End)?;
        }
        Ok(range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edgehtml_a11y_core::ControlType;
    use edgehtml_a11y_core::mock::{MockAutomation, MockDocument, Node};

    fn legacy_document() -> MockAutomation {
        MockAutomation::new(MockDocument::with_boundary_stops(
            Node::new(ControlType::Pane).children([
                Node::paragraph("ab").named("first"),
                Node::paragraph("cd").named("second"),
            ]),
        ))
    }

    #[test]
    fn test_select_strategy() {
        let legacy = select_strategy::<MockAutomation>(EngineCapabilities::for_build(14393));
        assert_eq!(legacy.name(), "legacy-gap");
        let modern = select_strategy::<MockAutomation>(EngineCapabilities::for_build(17134));
        assert_eq!(modern.name(), "standard");
    }

    #[test]
    fn test_zero_direction_does_not_move() {
        let automation = legacy_document();
        let mut range = automation.document().range(1, 1);
        let moved = LegacyGapBoundaries
            .move_range(&automation, &mut range, TextUnit::Word, 0, None, true)
            .unwrap();
        assert_eq!(moved, 0);
        assert_eq!(range.span(), (1, 1));
    }

    #[test]
    fn test_forward_character_skips_element_start() {
        // Positions: 0 stop, 1 'a', 2 'b', 3 stop, 4 'c', 5 'd'.
        let automation = legacy_document();
        let mut range = automation.document().range(2, 2);
        let moved = LegacyGapBoundaries
            .move_range(&automation, &mut range, TextUnit::Character, 1, None, true)
            .unwrap();
        assert_eq!(moved, 1);
        assert_eq!(range.span(), (4, 4));
    }

    #[test]
    fn test_standard_lands_on_stop() {
        let automation = legacy_document();
        let mut range = automation.document().range(2, 2);
        StandardBoundaries
            .move_range(&automation, &mut range, TextUnit::Character, 1, None, true)
            .unwrap();
        assert_eq!(range.span(), (3, 3));
    }

    #[test]
    fn test_backward_character_skips_element_start() {
        let automation = legacy_document();
        let mut range = automation.document().range(4, 4);
        let moved = LegacyGapBoundaries
            .move_range(&automation, &mut range, TextUnit::Character, -1, None, true)
            .unwrap();
        assert_eq!(moved, -1);
        assert_eq!(range.span(), (2, 2));
    }

    #[test]
    fn test_normalize_skips_leading_stop() {
        let automation = legacy_document();
        let doc = automation.document();
        let second = doc.element_range(doc.find("second").unwrap());
        assert_eq!(second.span(), (3, 6));
        let normalized = LegacyGapBoundaries
            .normalize_element_range(&automation, second)
            .unwrap();
        assert_eq!(normalized.span(), (4, 6));
    }
}
