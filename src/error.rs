//! Unified error type for all linelog operations.

use std::path::PathBuf;
use std::sync::Arc;

/// Error type for linelog operations.
#[derive(Debug)]
pub enum Error {
    /// Invalid byte-size or duration literal.
    Parse(String),
    /// I/O error from the underlying sink.
    Io(std::io::Error),
    /// Rotation renamed the old file but could not open a new one at `path`.
    Rotation {
        /// Path of the file that could not be reopened.
        path: PathBuf,
        /// The open error.
        source: std::io::Error,
    },
    /// Rejected configuration value.
    Config(String),
    /// TOML config parsing error.
    ConfigParse(toml::de::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(s) => write!(f, "parse error: {s}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Rotation { path, source } => {
                write!(f, "rotation failed to reopen {}: {source}", path.display())
            }
            Self::Config(s) => write!(f, "config error: {s}"),
            Self::ConfigParse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) | Self::Rotation { source: e, .. } => Some(e),
            Self::ConfigParse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Self::ConfigParse(e)
    }
}

/// Callback invoked with a label and the error wherever a failure has no
/// caller to return to (background flush, backup pruning, compression).
/// The library never routes its own errors through its own pipeline.
pub type ErrorHandler = Arc<dyn Fn(&str, &Error) + Send + Sync>;

/// The default handler swallows errors.
#[must_use]
pub fn noop_error_handler() -> ErrorHandler {
    Arc::new(|_, _| {})
}
