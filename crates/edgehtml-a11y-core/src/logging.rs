//! Logging facilities for the EdgeHTML accessibility adapter.
//!
//! The adapter uses the `tracing` crate for instrumentation. Nothing is
//! printed unless the host installs a subscriber:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("edgehtml_a11y::fields=debug")
//!     .init();
//! ```
//!
//! Use the constants in [`targets`] to filter by subsystem.

/// Span names used by the adapter.
pub mod span_names {
    /// One pull of the unbalanced field cursor.
    pub const FIELD_STEP: &str = "edgehtml_a11y::field_step";
    /// A boundary-aware move.
    pub const MOVE: &str = "edgehtml_a11y::move";
    /// A heading quick-nav search.
    pub const HEADING_SEARCH: &str = "edgehtml_a11y::heading_search";
}

/// Target names for log filtering.
pub mod targets {
    /// Unbalanced field builder.
    pub const FIELDS: &str = "edgehtml_a11y::fields";
    /// Boundary-aware move and expand.
    pub const MOVEMENT: &str = "edgehtml_a11y::movement";
    /// Heading classification and iteration.
    pub const HEADINGS: &str = "edgehtml_a11y::headings";
    /// Root and container glue.
    pub const ROOT: &str = "edgehtml_a11y::root";
    /// Configuration loading.
    pub const CONFIG: &str = "edgehtml_a11y::config";
}

/// A guard that keeps a tracing span entered until dropped.
///
/// Useful for timing one render or navigation request.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create and enter a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: "edgehtml_a11y::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

/// Trace-level event on the adapter's default target.
#[macro_export]
macro_rules! a11y_trace {
    ($($arg:tt)*) => {
        tracing::trace!(target: "edgehtml_a11y", $($arg)*)
    };
}

/// Debug-level event on the adapter's default target.
#[macro_export]
macro_rules! a11y_debug {
    ($($arg:tt)*) => {
        tracing::debug!(target: "edgehtml_a11y", $($arg)*)
    };
}
