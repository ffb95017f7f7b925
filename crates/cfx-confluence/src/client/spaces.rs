//! Space operations for Confluence API.

use tracing::info;

use super::ConfluenceClient;
use crate::error::ConfluenceError;
use crate::types::{Space, SpacesResponse};

/// Upper bound for the single space listing call.
const SPACE_LIMIT: usize = 500;

impl ConfluenceClient {
    /// URL of the space listing.
    pub(super) fn spaces_url(&self) -> String {
        format!("{}/space?start=0&limit={SPACE_LIMIT}", self.api_url())
    }

    /// List all spaces visible to the authenticated user.
    pub(crate) fn get_all_spaces(&self) -> Result<Vec<Space>, ConfluenceError> {
        let url = self.spaces_url();

        let response: SpacesResponse = self.get_json(&url)?;
        info!("Found {} spaces", response.results.len());
        Ok(response.results)
    }
}
