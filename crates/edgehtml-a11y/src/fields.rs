//! Field sequences for unbalanced ranges.
//!
//! EdgeHTML answers "what encloses this range" with the deepest element at
//! the range start, not with the element that spans the whole range. The
//! host's balanced extraction therefore cannot be handed an arbitrary range.
//! [`FieldCursor`] works around this by zooming out from the start:
//!
//! 1. Take the deepest element enclosing the start of the range and render
//!    the part of the range inside it with balanced extraction.
//! 2. Emit start markers for every ancestor up to the requested root before
//!    that content.
//! 3. For each ancestor, innermost first, render whatever of the range lies
//!    after the content produced so far and inside that ancestor by running
//!    the same procedure with the ancestor as root, then emit its end marker.
//!
//! The recursion is kept on an explicit stack. Each call to `next` performs
//! one bounded step, so a consumer that stops pulling cancels the rest of the
//! work.

use std::cmp::Ordering;

use edgehtml_a11y_core::logging::{span_names, targets};
use edgehtml_a11y_core::{
    Automation, Clipping, ControlField, Endpoint, FieldRequest, RangeExt, Result, TextItem,
    TextRange,
};

use crate::adapter::WebTextAdapter;

/// One call of the zoom-out procedure.
struct Invocation<A: Automation> {
    root: A::Element,
    range: A::Range,
    request: FieldRequest,
}

/// An element between the enclosing element and the root.
struct Ancestor<A: Automation> {
    element: A::Element,
    /// `None` for a root that was not requested.
    field: Option<ControlField>,
    range: Option<A::Range>,
}

/// Emits end markers and leftover content for collected ancestors.
struct Closing<A: Automation> {
    ancestors: std::vec::IntoIter<Ancestor<A>>,
    /// End of the content produced so far.
    cursor: A::Range,
    /// The range of the invocation that collected the ancestors.
    bound: A::Range,
}

enum Frame<A: Automation> {
    Open(Invocation<A>),
    Balanced(Invocation<A>),
    Emit(std::vec::IntoIter<TextItem>),
    Close(Closing<A>),
}

/// Lazy, well-nested field sequence for a range.
///
/// Created by [`WebTextAdapter::build_fields`]. Items come out in document
/// order: an element's start marker, then its content, then its end marker.
///
/// A failed automation call is yielded once as `Err`, after which the cursor
/// is exhausted. Elements whose control field cannot be built only cut the
/// ancestor walk short.
pub struct FieldCursor<'a, A: Automation> {
    adapter: &'a WebTextAdapter<A>,
    stack: Vec<Frame<A>>,
}

impl<'a, A: Automation> FieldCursor<'a, A> {
    pub(crate) fn new(
        adapter: &'a WebTextAdapter<A>,
        root: A::Element,
        range: A::Range,
        request: FieldRequest,
    ) -> Self {
        Self {
            adapter,
            stack: vec![Frame::Open(Invocation {
                root,
                range,
                request,
            })],
        }
    }

    fn step(&mut self, frame: Frame<A>) -> Result<Option<TextItem>> {
        match frame {
            Frame::Emit(mut items) => {
                let item = items.next();
                if item.is_some() {
                    self.stack.push(Frame::Emit(items));
                }
                Ok(item)
            }
            Frame::Open(invocation) => self.open(invocation).map(|()| None),
            Frame::Balanced(invocation) => self.balanced(invocation).map(|()| None),
            Frame::Close(closing) => self.close_next(closing).map(|()| None),
        }
    }

    fn balanced(&mut self, invocation: Invocation<A>) -> Result<()> {
        let Invocation {
            root,
            range,
            request,
        } = invocation;
        let items = self.adapter.automation().balanced_fields(
            &root,
            &range,
            &self.adapter.config().format,
            request,
        )?;
        self.stack.push(Frame::Emit(items.into_iter()));
        Ok(())
    }

    fn open(&mut self, invocation: Invocation<A>) -> Result<()> {
        let _span = tracing::trace_span!(target: targets::FIELDS, span_names::FIELD_STEP).entered();
        let Invocation {
            root,
            range,
            request,
        } = invocation;
        let adapter = self.adapter;
        let automation = adapter.automation();
        let cache = adapter.cache_request();

        if !request.recurse_children {
            tracing::debug!(target: targets::FIELDS, "not recursing, using balanced extraction");
            self.stack.push(Frame::Balanced(Invocation {
                root,
                range,
                request: FieldRequest {
                    always_walk_ancestors: true,
                    ..request
                },
            }));
            return Ok(());
        }

        if tracing::enabled!(target: targets::FIELDS, tracing::Level::DEBUG) {
            tracing::debug!(
                target: targets::FIELDS,
                root = ?automation.localized_control_type(&root).ok(),
                text = ?range.text(None).ok(),
                include_root = request.include_root,
                "building unbalanced fields"
            );
        }

        let mut start_range = range.clone_range()?;
        start_range.collapse(Endpoint::Start)?;
        let Some(enclosing) = automation.enclosing_element_build_cache(&start_range, cache)? else {
            tracing::debug!(target: targets::FIELDS, "no enclosing element");
            return Ok(());
        };
        let Some(enclosing_range) = adapter.element_range(&enclosing)? else {
            tracing::debug!(target: targets::FIELDS, "enclosing element has no range");
            return Ok(());
        };
        start_range.move_endpoint_by_range(Endpoint::End, &enclosing_range, Endpoint::End)?;
        start_range.clamp_end_to(&range)?;
        if start_range.is_collapsed()? {
            tracing::debug!(target: targets::FIELDS, "collapsed range");
            return Ok(());
        }

        let children = automation.children_build_cache(&start_range, cache)?;
        if let [child] = children.as_slice()
            && automation.compare_elements(&root, child)?
        {
            tracing::debug!(target: targets::FIELDS, "root is the single embedded child");
            self.stack.push(Frame::Balanced(Invocation {
                root,
                range: start_range,
                request: FieldRequest {
                    recurse_children: false,
                    always_walk_ancestors: false,
                    ..request
                },
            }));
            return Ok(());
        }

        let (ancestors, has_ancestors) = self.collect_ancestors(&enclosing, &root, &range, request)?;

        let clipping = Clipping {
            start: enclosing_range.compare_endpoints(Endpoint::Start, &start_range, Endpoint::Start)?
                == Ordering::Less,
            end: enclosing_range.compare_endpoints(Endpoint::End, &start_range, Endpoint::End)?
                == Ordering::Greater,
        };
        let starts: Vec<TextItem> = ancestors
            .iter()
            .rev()
            .filter_map(|ancestor| ancestor.field.clone().map(TextItem::ControlStart))
            .collect();

        self.stack.push(Frame::Close(Closing {
            ancestors: ancestors.into_iter(),
            cursor: start_range.clone_range()?,
            bound: range,
        }));
        self.stack.push(Frame::Balanced(Invocation {
            root: enclosing,
            range: start_range,
            request: FieldRequest {
                include_root: request.include_root || has_ancestors,
                recurse_children: true,
                always_walk_ancestors: false,
                root_clipped: clipping,
            },
        }));
        if !starts.is_empty() {
            self.stack.push(Frame::Emit(starts.into_iter()));
        }
        Ok(())
    }

    /// Walk from `enclosing` up to `root`, innermost first.
    ///
    /// The enclosing element itself is not collected. Returns whether any
    /// element other than the root was visited.
    fn collect_ancestors(
        &self,
        enclosing: &A::Element,
        root: &A::Element,
        bound: &A::Range,
        request: FieldRequest,
    ) -> Result<(Vec<Ancestor<A>>, bool)> {
        let automation = self.adapter.automation();
        let cache = self.adapter.cache_request();
        let mut ancestors = Vec::new();
        let mut has_ancestors = false;
        let mut current = Some(enclosing.clone());
        let mut is_enclosing = true;

        while let Some(element) = current.take() {
            let is_root = automation.compare_elements(&element, root)?;
            if !is_root {
                has_ancestors = true;
            }
            if !is_enclosing {
                let field = if request.include_root || !is_root {
                    match automation.control_field(&element, cache) {
                        Ok(field) => Some(field),
                        Err(err) if err.is_missing_structural_data() => {
                            tracing::debug!(target: targets::FIELDS, error = %err, "stopping ancestor walk");
                            break;
                        }
                        Err(err) => return Err(err),
                    }
                } else {
                    None
                };
                let range = self.adapter.element_range(&element)?;
                let mut ancestor = Ancestor::<A> {
                    element: element.clone(),
                    field,
                    range,
                };
                if let (Some(field), Some(range)) = (ancestor.field.as_mut(), ancestor.range.as_ref()) {
                    field.set_clipping(Clipping {
                        start: range.compare_endpoints(Endpoint::Start, bound, Endpoint::Start)?
                            == Ordering::Less,
                        end: range.compare_endpoints(Endpoint::End, bound, Endpoint::End)?
                            == Ordering::Greater,
                    });
                }
                ancestors.push(ancestor);
            }
            if is_root {
                break;
            }
            is_enclosing = false;
            current = automation.parent_element_build_cache(&element, cache)?;
        }

        tracing::trace!(target: targets::FIELDS, count = ancestors.len(), has_ancestors, "collected ancestors");
        Ok((ancestors, has_ancestors))
    }

    /// Close the next ancestor: render what follows inside it, then its end marker.
    fn close_next(&mut self, mut closing: Closing<A>) -> Result<()> {
        let Some(ancestor) = closing.ancestors.next() else {
            return Ok(());
        };
        closing.cursor.collapse(Endpoint::End)?;

        let mut leftover = None;
        if let Some(range) = &ancestor.range {
            closing
                .cursor
                .move_endpoint_by_range(Endpoint::End, range, Endpoint::End)?;
            let clipped_end = closing.cursor.clamp_end_to(&closing.bound)?;
            let clipped_start = range.compare_endpoints(Endpoint::Start, &closing.bound, Endpoint::Start)?
                == Ordering::Less;
            if closing.cursor.is_collapsed()? {
                tracing::trace!(target: targets::FIELDS, "no content after ancestor");
            } else {
                leftover = Some(Invocation {
                    root: ancestor.element.clone(),
                    range: closing.cursor.clone_range()?,
                    request: FieldRequest {
                        include_root: false,
                        recurse_children: true,
                        always_walk_ancestors: true,
                        root_clipped: Clipping {
                            start: clipped_start,
                            end: clipped_end,
                        },
                    },
                });
            }
        }

        self.stack.push(Frame::Close(closing));
        if let Some(field) = ancestor.field {
            self.stack
                .push(Frame::Emit(vec![TextItem::ControlEnd(field)].into_iter()));
        }
        if let Some(invocation) = leftover {
            self.stack.push(Frame::Open(invocation));
        }
        Ok(())
    }
}

impl<A: Automation> Iterator for FieldCursor<'_, A> {
    type Item = Result<TextItem>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(frame) = self.stack.pop() {
            match self.step(frame) {
                Ok(Some(item)) => return Some(Ok(item)),
                Ok(None) => {}
                Err(err) => {
                    self.stack.clear();
                    return Some(Err(err));
                }
            }
        }
        None
    }
}

impl<A: Automation> std::iter::FusedIterator for FieldCursor<'_, A> {}
