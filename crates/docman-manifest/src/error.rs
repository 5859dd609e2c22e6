//! Manifest error types.

use std::path::PathBuf;

/// Error returned when a manifest cannot be loaded or checked.
///
/// Structural rule violations are not errors; they are reported as
/// [`Diagnostic`](crate::Diagnostic)s.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    /// Manifest file not found.
    #[error("Manifest not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error reading the manifest or scanning docs.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// YAML syntax error, including duplicate mapping keys.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// The YAML parsed but does not have the manifest's shape.
    #[error("Invalid manifest at {location}: {message}")]
    Shape {
        /// Key path of the offending value (e.g., "`nav > Modules`").
        location: String,
        /// What was expected.
        message: String,
    },
    /// Docs directory does not exist.
    #[error("Docs directory not found: {}", .0.display())]
    DocsDirNotFound(PathBuf),
    /// Invalid exclude glob.
    #[error("Invalid glob pattern {pattern:?}: {source}")]
    Pattern {
        /// The pattern as written.
        pattern: String,
        /// Underlying glob error.
        #[source]
        source: glob::PatternError,
    },
}

impl ManifestError {
    pub(crate) fn shape(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Shape {
            location: location.into(),
            message: message.into(),
        }
    }
}
