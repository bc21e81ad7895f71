//! The adapter tying the automation client, configuration and boundary strategy together.

use edgehtml_a11y_core::logging::targets;
use edgehtml_a11y_core::{
    AdapterConfig, Automation, CacheRequest, Direction, EngineCapabilities, Endpoint,
    FieldRequest, RangeExt, Result, TextRange, TextUnit,
};

use crate::boundaries::{BoundaryStrategy, select_strategy};
use crate::embedded::is_embedded;
use crate::fields::FieldCursor;
use crate::headings::{HeadingIterator, HeadingSelector};
use crate::root::HtmlRoot;
use crate::text_info::WebTextInfo;

/// Screen-reader adapter for one EdgeHTML process.
///
/// The boundary strategy is fixed at construction from the configured
/// engine capabilities.
pub struct WebTextAdapter<A: Automation> {
    automation: A,
    config: AdapterConfig,
    capabilities: EngineCapabilities,
    boundaries: Box<dyn BoundaryStrategy<A>>,
    cache_request: CacheRequest,
}

impl<A: Automation> WebTextAdapter<A> {
    /// Create an adapter, selecting the boundary strategy from `config`.
    pub fn new(automation: A, config: AdapterConfig) -> Self {
        let capabilities = config.capabilities();
        Self::with_strategy(automation, config, select_strategy(capabilities))
    }

    /// Create an adapter with an explicit boundary strategy.
    pub fn with_strategy(
        automation: A,
        config: AdapterConfig,
        boundaries: Box<dyn BoundaryStrategy<A>>,
    ) -> Self {
        let capabilities = config.capabilities();
        let cache_request = config
            .cache
            .property_ids()
            .fold(CacheRequest::control_fields(), CacheRequest::with_property);
        tracing::info!(
            target: targets::ROOT,
            strategy = boundaries.name(),
            os_build = ?config.engine.os_build,
            "EdgeHTML adapter created"
        );
        Self {
            automation,
            config,
            capabilities,
            boundaries,
            cache_request,
        }
    }

    pub fn automation(&self) -> &A {
        &self.automation
    }

    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    pub fn capabilities(&self) -> EngineCapabilities {
        self.capabilities
    }

    /// Name of the active boundary strategy.
    pub fn strategy_name(&self) -> &'static str {
        self.boundaries.name()
    }

    /// Properties prefetched when building control fields.
    pub fn cache_request(&self) -> &CacheRequest {
        &self.cache_request
    }

    /// Range of an element, normalised for the running engine.
    pub fn element_range(&self, element: &A::Element) -> Result<Option<A::Range>> {
        match self.automation.element_range(element)? {
            Some(range) => self
                .boundaries
                .normalize_element_range(&self.automation, range)
                .map(Some),
            None => Ok(None),
        }
    }

    /// Boundary-aware move. See [`BoundaryStrategy::move_range`].
    pub fn move_range(
        &self,
        range: &mut A::Range,
        unit: TextUnit,
        direction: i32,
        endpoint: Option<Endpoint>,
        skip_replaced_content: bool,
    ) -> Result<i32> {
        self.boundaries.move_range(
            &self.automation,
            range,
            unit,
            direction,
            endpoint,
            skip_replaced_content,
        )
    }

    /// Boundary-aware expand.
    pub fn expand(&self, range: &mut A::Range, unit: TextUnit) -> Result<()> {
        self.boundaries.expand(&self.automation, range, unit)
    }

    /// Whether `range` sits on an embedded object.
    pub fn is_embedded(&self, range: &A::Range) -> Result<bool> {
        is_embedded(&self.automation, range)
    }

    /// Wrap a range for movement through this adapter.
    pub fn text_info(&self, range: A::Range) -> WebTextInfo<'_, A> {
        WebTextInfo::new(self, range)
    }

    /// Lazy field sequence for `range` under `root`.
    pub fn build_fields(
        &self,
        root: A::Element,
        range: A::Range,
        request: FieldRequest,
    ) -> FieldCursor<'_, A> {
        FieldCursor::new(self, root, range, request)
    }

    /// Headings of the document under `document_root` matching `node_type`
    /// (`heading` or `heading1` to `heading6`), starting after or before `position`.
    pub fn headings(
        &self,
        document_root: &A::Element,
        node_type: &str,
        direction: Direction,
        position: Option<A::Range>,
    ) -> Result<HeadingIterator<'_, A>> {
        let selector = HeadingSelector::from_node_type(node_type)?;
        HeadingIterator::new(self, document_root, selector, direction, position)
    }

    /// Root glue for the element hosting a page.
    pub fn html_root(&self, element: A::Element) -> HtmlRoot<'_, A> {
        HtmlRoot::new(self, element)
    }

    /// Whether an editable element has no text.
    ///
    /// Reads at most two characters. EdgeHTML reports a lone newline for an
    /// empty field.
    pub fn is_text_empty(&self, element: &A::Element) -> Result<bool> {
        let Some(range) = self.element_range(element)? else {
            return Ok(true);
        };
        if range.is_collapsed()? {
            return Ok(true);
        }
        let text = range.text(Some(2))?;
        edgehtml_a11y_core::a11y_debug!(?text, "probed field text");
        Ok(text == "\n")
    }
}
