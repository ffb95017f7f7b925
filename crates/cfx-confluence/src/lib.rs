//! Confluence page extraction for cfx.
//!
//! This crate provides:
//! - [`ConfluenceClient`]: sync REST API client with HTTP Basic authentication
//! - [`WikiApi`]: the reads the extractor needs, implemented by the client
//! - [`Extractor`]: walks spaces and pages, yielding [`PageRecord`]s lazily
//!
//! # Example
//!
//! ```ignore
//! use cfx_confluence::{ConfluenceClient, ExtractOptions, Extractor};
//!
//! let client = ConfluenceClient::new(
//!     "https://acme.atlassian.net/wiki",
//!     "bot@acme.io",
//!     "api-token",
//! )?;
//!
//! let extractor = Extractor::new(&client, ExtractOptions::default());
//! for record in extractor.extract()? {
//!     let record = record?;
//!     println!("{}: {}", record.id, record.title);
//! }
//! ```

mod auth;

// API client
mod client;
pub use client::ConfluenceClient;

mod wiki;
pub use wiki::WikiApi;

// Types
pub mod types;

// Extraction
mod extract;
pub use extract::{DEFAULT_PAGE_SIZE, ExtractOptions, Extractor, PageRecords};

mod record;
pub use record::{PageMetadata, PageRecord, record_id};

pub mod text;
pub mod timestamp;

#[cfg(any(test, feature = "mock"))]
mod mock;
#[cfg(any(test, feature = "mock"))]
pub use mock::{MOCK_BASE_URL, MockWiki, WikiCall};

// Errors
pub mod error;
pub use error::{ConfluenceError, ExtractError};
