//! CLI error types.

use cfx_config::ConfigError;
use cfx_confluence::{ConfluenceError, ExtractError};
use cfx_output::OutputError;

/// Exit status for configuration and connectivity problems the user can fix.
pub(crate) const EXIT_USER_ERROR: i32 = 1;
/// Exit status for everything else.
pub(crate) const EXIT_INTERNAL_ERROR: i32 = 2;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Confluence(#[from] ConfluenceError),

    #[error("{0}")]
    Extract(#[from] ExtractError),

    #[error("{0}")]
    Output(#[from] OutputError),

    #[error("invalid last_run '{value}' in state file: {source}")]
    State {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("{0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Whether the user can fix this by changing configuration or credentials.
    pub(crate) fn is_user_error(&self) -> bool {
        match self {
            Self::Config(_) | Self::Confluence(ConfluenceError::InvalidUrl(_)) => true,
            Self::Extract(err) => err.is_user_error(),
            _ => false,
        }
    }

    /// Process exit status for this error.
    pub(crate) fn exit_code(&self) -> i32 {
        if self.is_user_error() {
            EXIT_USER_ERROR
        } else {
            EXIT_INTERNAL_ERROR
        }
    }
}
