//! Read-only wiki API used by the extractor.

use crate::error::ConfluenceError;
use crate::types::{PageBatch, PageDetail, Space};

/// The three reads the extractor needs from a wiki.
///
/// Implemented by [`ConfluenceClient`](crate::ConfluenceClient) over HTTP and
/// by `MockWiki` (behind the `mock` feature) in memory.
pub trait WikiApi {
    /// List all spaces in one call.
    fn list_spaces(&self) -> Result<Vec<Space>, ConfluenceError>;

    /// List up to `limit` pages of a space, starting at offset `start`.
    fn list_pages(
        &self,
        space_key: &str,
        start: usize,
        limit: usize,
    ) -> Result<PageBatch, ConfluenceError>;

    /// Look up a single page with creation and version metadata.
    fn get_page(&self, page_id: &str) -> Result<PageDetail, ConfluenceError>;
}
