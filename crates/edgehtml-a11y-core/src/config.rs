//! Adapter configuration.
//!
//! Configuration is read from TOML. Every field has a default, so an empty
//! document is a valid configuration:
//!
//! ```toml
//! [engine]
//! os_build = 14393
//!
//! [format]
//! report_headings = true
//! report_links = false
//!
//! [cache]
//! extra_properties = [30005]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::ids::{GAP_REMOVAL_BUILD, PropertyId};
use crate::logging::targets;

/// Top-level adapter configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdapterConfig {
    /// Engine version information.
    pub engine: EngineConfig,
    /// Presentation options handed to balanced extraction.
    pub format: FormatConfig,
    /// Control-field cache request tuning.
    pub cache: CacheConfig,
}

impl AdapterConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|err| Error::config_io(path, err))?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(target: targets::CONFIG, path = %path.display(), "loaded adapter configuration");
        Ok(config)
    }

    /// Engine capabilities this configuration selects.
    pub fn capabilities(&self) -> EngineCapabilities {
        self.engine.capabilities()
    }
}

/// What is known about the running EdgeHTML engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Windows build number, if the host detected it.
    pub os_build: Option<u32>,
    /// Force the legacy-gap behaviour on or off regardless of the build.
    pub legacy_gap: Option<bool>,
}

impl EngineConfig {
    /// Resolve the capability flags.
    ///
    /// An explicit override wins. Otherwise builds before the gap removal
    /// use the legacy behaviour, and an unknown build is treated as modern.
    pub fn capabilities(&self) -> EngineCapabilities {
        let legacy_gap = self
            .legacy_gap
            .unwrap_or_else(|| self.os_build.is_some_and(|build| build < GAP_REMOVAL_BUILD));
        EngineCapabilities { legacy_gap }
    }
}

/// Capability flags selected once at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct EngineCapabilities {
    /// The engine inserts empty stops at element boundaries.
    pub legacy_gap: bool,
}

impl EngineCapabilities {
    /// Capabilities of the engine shipped with a given Windows build.
    pub fn for_build(build: u32) -> Self {
        EngineConfig {
            os_build: Some(build),
            legacy_gap: None,
        }
        .capabilities()
    }
}

/// Which document features the engine wants reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatConfig {
    pub report_headings: bool,
    pub report_links: bool,
    pub report_lists: bool,
    pub report_tables: bool,
    pub report_landmarks: bool,
    pub report_graphics: bool,
    pub report_clickable: bool,
    pub include_layout_tables: bool,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            report_headings: true,
            report_links: true,
            report_lists: true,
            report_tables: true,
            report_landmarks: true,
            report_graphics: true,
            report_clickable: true,
            include_layout_tables: false,
        }
    }
}

/// Extra properties to prefetch when building control fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Raw `UIA_*PropertyId` values.
    pub extra_properties: Vec<i32>,
}

impl CacheConfig {
    /// Extra properties as typed ids.
    pub fn property_ids(&self) -> impl Iterator<Item = PropertyId> + '_ {
        self.extra_properties.iter().copied().map(PropertyId)
    }
}

static_assertions::assert_impl_all!(AdapterConfig: Send, Sync);
