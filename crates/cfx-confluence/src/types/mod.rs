//! Confluence REST API types.
//!
//! Only fields the extractor reads are modelled. Serde ignores the rest of
//! the API response, and every field defaults when absent so a sparse page
//! still deserializes.

mod page;
mod space;

pub use page::{Body, History, Links, PageBatch, PageDetail, PageSummary, SpaceRef, Storage, User, Version};
pub use space::{Space, SpacesResponse};
