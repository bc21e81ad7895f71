//! Collaborator model for the EdgeHTML accessibility adapter.
//!
//! This crate describes what the adapter needs from its host:
//!
//! - **Text ranges**: the [`TextRange`] primitive and [`RangeExt`] helpers
//! - **Automation**: element identity, tree walking and the host's generic
//!   routines through [`Automation`]
//! - **Fields**: [`ControlField`] and the [`TextItem`] markers of a field sequence
//! - **Roles**: UIA control types mapped to AccessKit roles
//! - **Configuration**: engine version and format options from TOML
//! - **Errors and logging**: the [`Error`] enum and tracing targets
//!
//! With the `mock` feature, [`mock`] provides an in-memory document
//! implementing both traits.
//!
//! # Example
//!
//! ```
//! use edgehtml_a11y_core::{AdapterConfig, EngineCapabilities};
//!
//! let config = AdapterConfig::from_toml_str("[engine]\nos_build = 14393").unwrap();
//! assert_eq!(config.capabilities(), EngineCapabilities::for_build(14393));
//! assert!(config.capabilities().legacy_gap);
//! ```

pub mod automation;
pub mod config;
mod error;
pub mod field;
pub mod ids;
pub mod logging;
pub mod range;
mod role;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use automation::{Automation, CacheRequest, ChildObject, Condition};
pub use config::{AdapterConfig, CacheConfig, EngineCapabilities, EngineConfig, FormatConfig};
pub use error::{Error, Result};
pub use field::{Clipping, ControlField, FieldRequest, FieldValue, TextItem};
pub use ids::{
    AttributeValue, Direction, Endpoint, PropertyId, PropertyValue, RuntimeId, TextAttributeId,
    TextUnit,
};
pub use logging::PerfSpan;
pub use range::{EndPointTransfer, RangeExt, TextRange};
pub use role::ControlType;

// Re-export the AccessKit role type the fields carry
pub use accesskit::Role;
