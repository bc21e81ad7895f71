//! Document root and container glue.

use accesskit::Role;
use edgehtml_a11y_core::logging::targets;
use edgehtml_a11y_core::{Automation, ChildObject, Direction, PerfSpan, Result, TextRange};

use crate::adapter::WebTextAdapter;
use crate::headings::{HeadingIterator, HeadingSelector};

/// Role reported for EdgeHTML's top-level content element.
///
/// EdgeHTML exposes the page as a pane; reporting it as a document is what
/// makes the browse-mode engine attach.
pub fn document_role(role: Role) -> Role {
    match role {
        Role::Pane => Role::Document,
        other => other,
    }
}

/// The element hosting a page.
pub struct HtmlRoot<'a, A: Automation> {
    adapter: &'a WebTextAdapter<A>,
    element: A::Element,
}

impl<'a, A: Automation> HtmlRoot<'a, A> {
    pub fn new(adapter: &'a WebTextAdapter<A>, element: A::Element) -> Self {
        Self { adapter, element }
    }

    pub fn element(&self) -> &A::Element {
        &self.element
    }

    /// Role after the pane-to-document remap.
    pub fn role(&self) -> Result<Role> {
        let control_type = self.adapter.automation().control_type(&self.element)?;
        Ok(document_role(control_type.into()))
    }

    /// Whether a browse-mode tree interceptor should be attached.
    pub fn should_create_tree_interceptor(&self) -> Result<bool> {
        Ok(self.role()? == Role::Document)
    }

    /// The browse-mode glue for this root.
    pub fn tree_interceptor(&self) -> HtmlTreeInterceptor<'a, A> {
        HtmlTreeInterceptor::new(self.adapter, self.element.clone())
    }
}

/// Where a focus-gained notification on a root container should go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FocusRedirect<E> {
    /// Fire the event on this child instead.
    Delegate(E),
    /// Handle the event on the container itself.
    HandleNormally,
}

/// Route focus on a root container to its first child when that child is a UIA element.
pub fn redirect_focus<A: Automation>(
    automation: &A,
    container: &A::Element,
) -> Result<FocusRedirect<A::Element>> {
    Ok(match automation.first_child(container)? {
        Some(ChildObject::Structural(child)) => {
            tracing::debug!(target: targets::ROOT, "delegating focus to first child");
            FocusRedirect::Delegate(child)
        }
        _ => {
            edgehtml_a11y_core::a11y_trace!("container handles its own focus");
            FocusRedirect::HandleNormally
        }
    })
}

/// How a quick-nav request is served.
pub enum NodeIteration<'a, A: Automation> {
    /// EdgeHTML-specific heading search.
    Headings(HeadingIterator<'a, A>),
    /// The engine's generic search applies.
    Generic,
}

/// Browse-mode hooks for an EdgeHTML document.
pub struct HtmlTreeInterceptor<'a, A: Automation> {
    adapter: &'a WebTextAdapter<A>,
    root: A::Element,
}

impl<'a, A: Automation> HtmlTreeInterceptor<'a, A> {
    pub fn new(adapter: &'a WebTextAdapter<A>, root: A::Element) -> Self {
        Self { adapter, root }
    }

    /// Identifies the document across reloads: the name of the root's parent,
    /// which carries the page title.
    pub fn document_constant_identifier(&self) -> Result<Option<String>> {
        let automation = self.adapter.automation();
        match automation.parent_element_build_cache(&self.root, self.adapter.cache_request())? {
            Some(parent) => automation.name(&parent),
            None => Ok(None),
        }
    }

    /// Serve a quick-nav request for `node_type`.
    pub fn iter_nodes_by_type(
        &self,
        node_type: &str,
        direction: Direction,
        position: Option<&A::Range>,
    ) -> Result<NodeIteration<'a, A>> {
        let _perf = PerfSpan::new("iter_nodes_by_type");
        if !node_type.starts_with("heading") {
            return Ok(NodeIteration::Generic);
        }
        let selector = HeadingSelector::from_node_type(node_type)?;
        let position = position.map(|range| range.clone_range()).transpose()?;
        Ok(NodeIteration::Headings(HeadingIterator::new(
            self.adapter,
            &self.root,
            selector,
            direction,
            position,
        )?))
    }
}
