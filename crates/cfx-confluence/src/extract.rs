//! Page extraction.
//!
//! Walks every space, pages through its content listing, looks up metadata
//! for each page and yields normalized [`PageRecord`]s. Records are produced
//! lazily: no request for the next page is made until the caller pulls it.

use std::iter::FusedIterator;
use std::num::NonZeroUsize;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::error::ExtractError;
use crate::record::{PageMetadata, PageRecord};
use crate::text::page_text;
use crate::timestamp::parse_timestamp;
use crate::types::{PageSummary, Space};
use crate::wiki::WikiApi;

/// Default number of pages requested per listing call.
pub const DEFAULT_PAGE_SIZE: NonZeroUsize = NonZeroUsize::new(100).unwrap();

/// Extraction options.
#[derive(Debug, Clone, Copy)]
pub struct ExtractOptions {
    /// Only emit pages updated strictly after this instant. `None` emits everything.
    pub since: Option<DateTime<Utc>>,
    /// Convert storage markup to plain text prefixed with the page title.
    pub beautify: bool,
    /// Pages requested per listing call.
    pub page_size: NonZeroUsize,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            since: None,
            beautify: true,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Extracts page records from a wiki.
pub struct Extractor<'a, W: WikiApi + ?Sized> {
    api: &'a W,
    options: ExtractOptions,
}

impl<'a, W: WikiApi + ?Sized> Extractor<'a, W> {
    /// Create an extractor over `api`.
    pub fn new(api: &'a W, options: ExtractOptions) -> Self {
        Self { api, options }
    }

    /// List spaces and return a lazy record stream.
    ///
    /// The space listing is the only call made eagerly. Its failure is
    /// reported as [`ExtractError::Connection`] and no records are produced.
    pub fn extract(&self) -> Result<PageRecords<'a, W>, ExtractError> {
        let spaces = self.api.list_spaces().map_err(ExtractError::Connection)?;
        Ok(PageRecords {
            api: self.api,
            options: self.options,
            spaces: spaces.into_iter(),
            cursor: None,
            emitted: 0,
            done: false,
        })
    }
}

/// Pagination state within one space.
struct SpaceCursor {
    space: Space,
    start: usize,
    batch: std::vec::IntoIter<PageSummary>,
    more: bool,
}

impl SpaceCursor {
    fn new(space: Space) -> Self {
        Self {
            space,
            start: 0,
            batch: Vec::new().into_iter(),
            more: true,
        }
    }
}

/// Lazy stream of page records.
///
/// Yields `Err` at most once; the stream is finished afterwards.
pub struct PageRecords<'a, W: WikiApi + ?Sized> {
    api: &'a W,
    options: ExtractOptions,
    spaces: std::vec::IntoIter<Space>,
    cursor: Option<SpaceCursor>,
    emitted: usize,
    done: bool,
}

impl<W: WikiApi + ?Sized> PageRecords<'_, W> {
    /// Number of records yielded so far.
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    fn advance(&mut self) -> Result<Option<PageRecord>, ExtractError> {
        let page_size = self.options.page_size.get();

        loop {
            let Some(cursor) = self.cursor.as_mut() else {
                let Some(space) = self.spaces.next() else {
                    return Ok(None);
                };
                info!("Downloading Confluence space: {}", space.name);
                self.cursor = Some(SpaceCursor::new(space));
                continue;
            };

            if let Some(summary) = cursor.batch.next() {
                if let Some(record) = fetch_record(self.api, &self.options, &cursor.space, summary)? {
                    return Ok(Some(record));
                }
                continue;
            }

            if !cursor.more {
                self.cursor = None;
                continue;
            }

            let batch = self
                .api
                .list_pages(&cursor.space.key, cursor.start, page_size)?;
            if batch.results.is_empty() {
                info!("No results for {}", cursor.space.name);
                self.cursor = None;
                continue;
            }

            // A short batch is the last one.
            cursor.more = batch.results.len() == page_size;
            cursor.start += page_size;
            cursor.batch = batch.results.into_iter();
        }
    }
}

impl<W: WikiApi + ?Sized> Iterator for PageRecords<'_, W> {
    type Item = Result<PageRecord, ExtractError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.advance() {
            Ok(Some(record)) => {
                self.emitted += 1;
                Some(Ok(record))
            }
            Ok(None) => {
                self.done = true;
                info!("Extraction finished, {} pages emitted", self.emitted);
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

impl<W: WikiApi + ?Sized> FusedIterator for PageRecords<'_, W> {}

/// Look up one listed page and turn it into a record if it passes the `since` filter.
fn fetch_record<W: WikiApi + ?Sized>(
    api: &W,
    options: &ExtractOptions,
    space: &Space,
    summary: PageSummary,
) -> Result<Option<PageRecord>, ExtractError> {
    let Some(page_id) = summary.id.as_deref() else {
        warn!(
            "Skipping result without id in space {}: '{}'",
            space.name, summary.title
        );
        return Ok(None);
    };

    debug!(
        "Fetching document from Space: {} with document id {}",
        space.name, page_id
    );
    let detail = api.get_page(page_id)?;
    let metadata = PageMetadata::from_detail(&detail);

    if let Some(since) = options.since {
        let updated = parse_timestamp(&metadata.last_updated_date).map_err(|source| {
            ExtractError::Timestamp {
                page_id: page_id.to_owned(),
                value: metadata.last_updated_date.clone(),
                source,
            }
        })?;
        if updated <= since {
            debug!("Page {} not updated since {}, skipping", page_id, since);
            return Ok(None);
        }
    }

    let title = if summary.title.is_empty() {
        metadata.title.as_str()
    } else {
        summary.title.as_str()
    };
    let text = page_text(title, summary.storage_value(), options.beautify);
    Ok(Some(metadata.into_record(text)))
}
