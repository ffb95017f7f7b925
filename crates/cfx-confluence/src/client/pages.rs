//! Page operations for Confluence API.

use tracing::debug;

use super::{ConfluenceClient, encode_segment};
use crate::error::ConfluenceError;
use crate::types::{PageBatch, PageDetail};

impl ConfluenceClient {
    /// URL of one batch of a space's page listing.
    pub(super) fn space_pages_url(&self, space_key: &str, start: usize, limit: usize) -> String {
        format!(
            "{}/space/{}/content/page?depth=all&start={start}&limit={limit}&expand=body.storage",
            self.api_url(),
            encode_segment(space_key)
        )
    }

    /// URL of a single page lookup.
    pub(super) fn page_url(&self, page_id: &str) -> String {
        format!(
            "{}/content/{}?expand=space,history,version",
            self.api_url(),
            encode_segment(page_id)
        )
    }

    /// List one batch of pages in a space, with storage bodies expanded.
    pub(crate) fn get_space_pages(
        &self,
        space_key: &str,
        start: usize,
        limit: usize,
    ) -> Result<PageBatch, ConfluenceError> {
        let url = self.space_pages_url(space_key, start, limit);

        debug!("Listing pages of space {} from {}", space_key, start);

        self.get_json(&url)
    }

    /// Get page by ID with space, history and version expanded.
    pub(crate) fn get_page_by_id(&self, page_id: &str) -> Result<PageDetail, ConfluenceError> {
        let url = self.page_url(page_id);

        debug!("Getting page {}", page_id);

        self.get_json(&url)
    }
}
