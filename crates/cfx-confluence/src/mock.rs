//! Mock wiki implementation for testing.
//!
//! Provides [`MockWiki`] for exercising the extractor without a Confluence server.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::ConfluenceError;
use crate::types::{
    Body, History, Links, PageBatch, PageDetail, PageSummary, Space, SpaceRef, Storage, User,
    Version,
};
use crate::wiki::WikiApi;

/// Site base URL reported by mock pages.
pub const MOCK_BASE_URL: &str = "https://wiki.example.com/wiki";

/// A call received by [`MockWiki`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WikiCall {
    /// `list_spaces()`.
    ListSpaces,
    /// `list_pages(space_key, start, limit)`.
    ListPages {
        /// Space key.
        space_key: String,
        /// Offset.
        start: usize,
        /// Batch size.
        limit: usize,
    },
    /// `get_page(page_id)`.
    GetPage(String),
}

/// Mock wiki for testing.
///
/// Stores spaces and pages in memory and records every call. Page lookups
/// resolve against the space most recently listed, so two spaces may hold
/// pages with the same raw ID.
///
/// # Example
///
/// ```ignore
/// use cfx_confluence::MockWiki;
///
/// let wiki = MockWiki::new()
///     .with_space("DEV", "Development")
///     .with_page("DEV", "1", "Intro", "<p>Hi</p>", "2021-06-01T12:00:00.000Z");
/// ```
#[derive(Debug, Default)]
pub struct MockWiki {
    spaces: Vec<Space>,
    listings: HashMap<String, Vec<PageSummary>>,
    details: HashMap<(String, String), PageDetail>,
    space_failure: Option<(u16, String)>,
    current_space: RwLock<Option<String>>,
    calls: RwLock<Vec<WikiCall>>,
}

impl MockWiki {
    /// Create a new empty mock wiki.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a space.
    #[must_use]
    pub fn with_space(mut self, key: &str, name: &str) -> Self {
        self.spaces.push(Space::new(key, name));
        self.listings.entry(key.to_owned()).or_default();
        self
    }

    /// Add a page to a previously added space.
    ///
    /// The page is created by "Alice" and last modified by "Bob" at `updated`.
    ///
    /// # Panics
    ///
    /// Panics if the space was not added first.
    #[must_use]
    pub fn with_page(
        mut self,
        space_key: &str,
        id: &str,
        title: &str,
        body: &str,
        updated: &str,
    ) -> Self {
        let space = self
            .spaces
            .iter()
            .find(|s| s.key == space_key)
            .cloned()
            .unwrap_or_else(|| panic!("unknown mock space {space_key}"));

        self.listings
            .entry(space_key.to_owned())
            .or_default()
            .push(PageSummary {
                id: Some(id.to_owned()),
                title: title.to_owned(),
                body: Some(Body {
                    storage: Some(Storage {
                        value: body.to_owned(),
                    }),
                }),
            });

        self.details.insert(
            (space_key.to_owned(), id.to_owned()),
            PageDetail {
                id: id.to_owned(),
                title: title.to_owned(),
                space: SpaceRef {
                    key: space.key,
                    name: space.name,
                },
                history: History {
                    created_date: "2020-01-01T00:00:00.000Z".to_owned(),
                    created_by: User {
                        display_name: "Alice".to_owned(),
                    },
                },
                version: Version {
                    when: updated.to_owned(),
                    by: User {
                        display_name: "Bob".to_owned(),
                    },
                },
                links: Links {
                    base: MOCK_BASE_URL.to_owned(),
                },
            },
        );
        self
    }

    /// Add a listing result that has no page ID.
    #[must_use]
    pub fn with_unidentified_page(mut self, space_key: &str, title: &str) -> Self {
        self.listings
            .entry(space_key.to_owned())
            .or_default()
            .push(PageSummary {
                id: None,
                title: title.to_owned(),
                body: None,
            });
        self
    }

    /// Add a listing result whose page lookup returns 404.
    #[must_use]
    pub fn with_deleted_page(mut self, space_key: &str, id: &str) -> Self {
        self.listings
            .entry(space_key.to_owned())
            .or_default()
            .push(PageSummary {
                id: Some(id.to_owned()),
                title: "Deleted".to_owned(),
                body: None,
            });
        self
    }

    /// Make `list_spaces` fail with the given HTTP status.
    #[must_use]
    pub fn with_space_failure(mut self, status: u16, body: &str) -> Self {
        self.space_failure = Some((status, body.to_owned()));
        self
    }

    /// All calls received so far, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn calls(&self) -> Vec<WikiCall> {
        self.calls.read().unwrap().clone()
    }

    /// Listing calls received for one space.
    pub fn list_calls(&self, space_key: &str) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, WikiCall::ListPages { space_key: k, .. } if k == space_key))
            .count()
    }

    fn record(&self, call: WikiCall) {
        self.calls.write().unwrap().push(call);
    }
}

impl WikiApi for MockWiki {
    fn list_spaces(&self) -> Result<Vec<Space>, ConfluenceError> {
        self.record(WikiCall::ListSpaces);
        if let Some((status, body)) = &self.space_failure {
            return Err(ConfluenceError::HttpResponse {
                status: *status,
                body: body.clone(),
            });
        }
        Ok(self.spaces.clone())
    }

    fn list_pages(
        &self,
        space_key: &str,
        start: usize,
        limit: usize,
    ) -> Result<PageBatch, ConfluenceError> {
        self.record(WikiCall::ListPages {
            space_key: space_key.to_owned(),
            start,
            limit,
        });
        *self.current_space.write().unwrap() = Some(space_key.to_owned());

        let results: Vec<PageSummary> = self
            .listings
            .get(space_key)
            .map(|pages| pages.iter().skip(start).take(limit).cloned().collect())
            .unwrap_or_default();
        Ok(PageBatch { results })
    }

    fn get_page(&self, page_id: &str) -> Result<PageDetail, ConfluenceError> {
        self.record(WikiCall::GetPage(page_id.to_owned()));
        let space_key = self.current_space.read().unwrap().clone().unwrap_or_default();
        self.details
            .get(&(space_key, page_id.to_owned()))
            .cloned()
            .ok_or_else(|| ConfluenceError::HttpResponse {
                status: 404,
                body: format!("No content found with id: {page_id}"),
            })
    }
}
