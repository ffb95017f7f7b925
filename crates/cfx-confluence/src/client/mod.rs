//! Confluence REST API client.
//!
//! Provides a sync HTTP client for the Confluence REST API (`/rest/api`)
//! with HTTP Basic authentication.

mod pages;
mod spaces;

use std::time::Duration;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::de::DeserializeOwned;
use ureq::Agent;

use crate::auth::BasicAuth;
use crate::error::ConfluenceError;
use crate::types::{PageBatch, PageDetail, Space};
use crate::wiki::WikiApi;

/// Default HTTP timeout in seconds.
const DEFAULT_TIMEOUT: u64 = 30;

/// Characters escaped in path segments (space keys, page IDs).
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'~');

/// Confluence REST API client.
pub struct ConfluenceClient {
    agent: Agent,
    base_url: String,
    auth: BasicAuth,
}

impl ConfluenceClient {
    /// Create client for a Confluence site.
    ///
    /// # Arguments
    /// * `base_url` - Site base URL, e.g. `https://acme.atlassian.net/wiki`
    /// * `username` - Account username or email
    /// * `api_token` - API token or password
    ///
    /// # Errors
    ///
    /// Returns [`ConfluenceError::InvalidUrl`] if `base_url` is not an http(s) URL.
    pub fn new(base_url: &str, username: &str, api_token: &str) -> Result<Self, ConfluenceError> {
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfluenceError::InvalidUrl(base_url.to_owned()));
        }

        let agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(DEFAULT_TIMEOUT)))
            .http_status_as_error(false)
            .build()
            .into();

        Ok(Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_owned(),
            auth: BasicAuth::new(username, api_token),
        })
    }

    /// Get the API base URL.
    fn api_url(&self) -> String {
        format!("{}/rest/api", self.base_url)
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue an authenticated GET and decode the JSON response.
    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ConfluenceError> {
        let response = self
            .agent
            .get(url)
            .header("Authorization", self.auth.header())
            .header("Accept", "application/json")
            .call()?;

        let status = response.status().as_u16();
        let mut body_reader = response.into_body();

        if status >= 400 {
            let error_body = body_reader
                .read_to_string()
                .unwrap_or_else(|_| "(unable to read error body)".to_owned());
            return Err(ConfluenceError::HttpResponse {
                status,
                body: error_body,
            });
        }

        let body = body_reader.read_to_string()?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Percent-encode a value for use as a single URL path segment.
fn encode_segment(value: &str) -> String {
    utf8_percent_encode(value, PATH_SEGMENT).to_string()
}

impl WikiApi for ConfluenceClient {
    fn list_spaces(&self) -> Result<Vec<Space>, ConfluenceError> {
        self.get_all_spaces()
    }

    fn list_pages(
        &self,
        space_key: &str,
        start: usize,
        limit: usize,
    ) -> Result<PageBatch, ConfluenceError> {
        self.get_space_pages(space_key, start, limit)
    }

    fn get_page(&self, page_id: &str) -> Result<PageDetail, ConfluenceError> {
        self.get_page_by_id(page_id)
    }
}
