//! CLI-level errors (wraps domain and settings errors)

use thiserror::Error;

use crate::config::SettingsError;
use crate::domain::FoodWebError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Domain(#[from] FoodWebError),

    #[error("config: {0}")]
    Settings(#[from] SettingsError),

    #[error("I/O error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// Input ended before the session finished.
    #[error("input closed")]
    InputClosed,

    #[error("{0}")]
    Usage(String),
}

impl CliError {
    /// Create an I/O error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => crate::exitcode::USAGE,
            CliError::Settings(_) => crate::exitcode::CONFIG,
            CliError::Io { .. } | CliError::InputClosed => crate::exitcode::IOERR,
            CliError::Domain(_) => crate::exitcode::SOFTWARE,
        }
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Attach context to raw I/O results.
pub trait IoResultExt<T> {
    fn io_context(self, context: &str) -> CliResult<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn io_context(self, context: &str) -> CliResult<T> {
        self.map_err(|e| CliError::io(context, e))
    }
}
