//! Error types for Confluence extraction.

/// Error from Confluence API operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfluenceError {
    /// HTTP request failed (network error, timeout, etc).
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] ureq::Error),

    /// HTTP response error (server returned error status).
    #[error("HTTP error: {status} - {body}")]
    HttpResponse {
        /// HTTP status code.
        status: u16,
        /// Response body (may contain error details).
        body: String,
    },

    /// Response body was not the expected JSON.
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),

    /// Base URL is not an http(s) address.
    #[error("invalid Confluence URL '{0}': must start with http:// or https://")]
    InvalidUrl(String),
}

/// Error produced while extracting pages.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// The initial space listing failed.
    ///
    /// Bad credentials, an unreachable host or a wrong base URL all surface
    /// here, before any record is produced.
    #[error("cannot list Confluence spaces, check url and credentials: {0}")]
    Connection(#[source] ConfluenceError),

    /// An API call failed after the space listing succeeded.
    #[error("Confluence API error: {0}")]
    Api(#[from] ConfluenceError),

    /// A page carried a last-updated timestamp that could not be parsed.
    #[error("invalid last-updated timestamp '{value}' on page {page_id}")]
    Timestamp {
        /// Raw page ID.
        page_id: String,
        /// Offending value.
        value: String,
        /// Parse failure.
        #[source]
        source: chrono::ParseError,
    },
}

impl ExtractError {
    /// Whether the failure is caused by user configuration rather than a defect.
    pub fn is_user_error(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}
