//! Error types for the EdgeHTML accessibility adapter.

use std::path::PathBuf;

/// Result type alias for adapter operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while talking to UI Automation or configuring the adapter.
///
/// Empty or collapsed ranges and headings without a resolvable level are not
/// errors: the field builder produces nothing for them and the heading
/// iterator skips them.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A cross-process UI Automation call failed (dead element, broken link).
    ///
    /// Never retried by the adapter; the caller decides whether to abandon
    /// the current navigation or render.
    #[error("UI Automation call '{operation}' failed: {message}")]
    Communication {
        operation: &'static str,
        message: String,
    },

    /// Control field data could not be built for an element.
    #[error("No structural data for element {element}: {reason}")]
    MissingStructuralData { element: String, reason: String },

    /// A quick-nav node type that cannot be interpreted.
    #[error("Unknown node type '{0}'")]
    UnknownNodeType(String),

    /// Configuration file could not be read.
    #[error("Failed to read configuration '{path}': {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration text is not valid TOML for the adapter.
    #[error("Invalid adapter configuration: {source}")]
    ConfigParse {
        #[source]
        source: toml::de::Error,
    },
}

impl Error {
    /// Create a communication error.
    pub fn communication(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Communication {
            operation,
            message: message.into(),
        }
    }

    /// Create a missing structural data error.
    pub fn missing_structural_data(element: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MissingStructuralData {
            element: element.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration I/O error.
    pub fn config_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ConfigIo {
            path: path.into(),
            source,
        }
    }

    /// Whether this error is recovered locally by truncating an ancestor walk.
    pub fn is_missing_structural_data(&self) -> bool {
        matches!(self, Self::MissingStructuralData { .. })
    }

    /// Whether this error came from the UI Automation process boundary.
    pub fn is_communication(&self) -> bool {
        matches!(self, Self::Communication { .. })
    }
}

impl From<toml::de::Error> for Error {
    fn from(source: toml::de::Error) -> Self {
        Self::ConfigParse { source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        let err = Error::communication("CompareElements", "RPC_E_DISCONNECTED");
        assert!(err.is_communication());
        assert!(!err.is_missing_structural_data());
        assert_eq!(
            err.to_string(),
            "UI Automation call 'CompareElements' failed: RPC_E_DISCONNECTED"
        );

        let err = Error::missing_structural_data("group", "element is stale");
        assert!(err.is_missing_structural_data());
        assert!(err.to_string().contains("group"));
    }
}
