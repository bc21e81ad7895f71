//! Screen-reader adapter for EdgeHTML documents exposed through UI Automation.
//!
//! EdgeHTML's text ranges do not follow the shape a browse-mode engine
//! expects. This crate bridges the gap:
//!
//! - **Fields**: [`FieldCursor`] turns a flat range into well-nested start and
//!   end markers, even when the range cuts across element boundaries
//! - **Movement**: [`BoundaryStrategy`] implementations that never stop inside
//!   an embedded object and, on engines before build 15048, skip the empty
//!   element-boundary stops
//! - **Headings**: quick navigation keyed on the style-derived heading level
//! - **Root glue**: pane-to-document role remap and focus delegation
//!
//! The UI Automation client itself is supplied by the host through the
//! [`Automation`] trait from `edgehtml-a11y-core`.
//!
//! # Example
//!
//! ```ignore
//! use edgehtml_a11y::{AdapterConfig, FieldRequest, WebTextAdapter};
//!
//! let adapter = WebTextAdapter::new(host_automation, AdapterConfig::load("edgehtml.toml")?);
//! for item in adapter.build_fields(root, range, FieldRequest::default()) {
//!     engine.consume(item?);
//! }
//! ```

mod adapter;
mod boundaries;
mod embedded;
mod fields;
mod headings;
mod root;
mod text_info;

pub use adapter::WebTextAdapter;
pub use boundaries::{BoundaryStrategy, LegacyGapBoundaries, StandardBoundaries, select_strategy};
pub use embedded::is_embedded;
pub use fields::FieldCursor;
pub use headings::{
    HeadingIterator, HeadingQuickNavItem, HeadingSelector, heading_condition,
    heading_level_from_style,
};
pub use root::{
    FocusRedirect, HtmlRoot, HtmlTreeInterceptor, NodeIteration, document_role, redirect_focus,
};
pub use text_info::WebTextInfo;

pub use edgehtml_a11y_core::{
    AdapterConfig, Automation, Clipping, ControlField, Direction, EndPointTransfer, Endpoint,
    Error, FieldRequest, RangeExt, Result, TextItem, TextRange, TextUnit,
};
