//! HTTP Basic authentication for the Confluence REST API.
//!
//! Confluence Cloud accepts an account email with an API token, Server/Data
//! Center a username with a password or personal token.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Precomputed `Authorization` header value (internal use only).
pub(crate) struct BasicAuth {
    header: String,
}

impl BasicAuth {
    pub(crate) fn new(username: &str, token: &str) -> Self {
        let credentials = STANDARD.encode(format!("{username}:{token}"));
        Self {
            header: format!("Basic {credentials}"),
        }
    }

    /// Value for the `Authorization` request header.
    pub(crate) fn header(&self) -> &str {
        &self.header
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_header() {
        let auth = BasicAuth::new("user", "pass");
        assert_eq!(auth.header(), "Basic dXNlcjpwYXNz");
    }

    #[test]
    fn test_basic_header_keeps_colons_in_token() {
        let auth = BasicAuth::new("bot@acme.io", "a:b");
        let encoded = auth.header().trim_start_matches("Basic ");
        let decoded = STANDARD.decode(encoded).unwrap();
        assert_eq!(decoded, b"bot@acme.io:a:b");
    }
}
