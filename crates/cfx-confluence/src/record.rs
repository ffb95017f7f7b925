//! Normalized output records.

use serde::Serialize;

use crate::types::PageDetail;

/// Prefix of every record ID.
const RECORD_ID_PREFIX: &str = "Confluence - ";

/// Build the record ID for a page.
///
/// The space name is part of the ID, so pages from different spaces never
/// collide even if their raw IDs do.
pub fn record_id(space_name: &str, page_id: &str) -> String {
    format!("{RECORD_ID_PREFIX}{space_name}-{page_id}")
}

/// Page metadata, built once per page from the single-page lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMetadata {
    /// Record ID (see [`record_id`]).
    pub id: String,
    /// Creation timestamp as reported by Confluence.
    pub created_date: String,
    /// Last-updated timestamp as reported by Confluence.
    pub last_updated_date: String,
    /// Page title.
    pub title: String,
    /// Creator display name.
    pub creator: String,
    /// Last modifier display name.
    pub last_modifier: String,
    /// Canonical page URL.
    pub url: String,
    /// Owning space display name.
    pub space: String,
}

impl PageMetadata {
    /// Project a page lookup onto the output fields. Missing values become empty strings.
    pub fn from_detail(page: &PageDetail) -> Self {
        Self {
            id: record_id(&page.space.name, &page.id),
            created_date: page.history.created_date.clone(),
            last_updated_date: page.version.when.clone(),
            title: page.title.clone(),
            creator: page.history.created_by.display_name.clone(),
            last_modifier: page.version.by.display_name.clone(),
            url: format!(
                "{}/spaces/{}/pages/{}",
                page.links.base, page.space.key, page.id
            ),
            space: page.space.name.clone(),
        }
    }

    /// Attach page text and produce the output record.
    pub fn into_record(self, text: String) -> PageRecord {
        PageRecord {
            id: self.id,
            created_date: self.created_date,
            last_updated_date: self.last_updated_date,
            title: self.title,
            creator: self.creator,
            last_modifier: self.last_modifier,
            url: self.url,
            space: self.space,
            text,
        }
    }
}

/// One output row.
///
/// Field order is the column order of the output table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageRecord {
    pub id: String,
    pub created_date: String,
    pub last_updated_date: String,
    pub title: String,
    pub creator: String,
    pub last_modifier: String,
    pub url: String,
    pub space: String,
    pub text: String,
}

impl PageRecord {
    /// Column names, in serialization order.
    pub const HEADER: [&'static str; 9] = [
        "id",
        "created_date",
        "last_updated_date",
        "title",
        "creator",
        "last_modifier",
        "url",
        "space",
        "text",
    ];
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::types::{History, Links, SpaceRef, User, Version};

    fn detail() -> PageDetail {
        PageDetail {
            id: "4242".to_owned(),
            title: "Runbook".to_owned(),
            space: SpaceRef {
                key: "OPS".to_owned(),
                name: "Operations".to_owned(),
            },
            history: History {
                created_date: "2020-01-01T00:00:00.000Z".to_owned(),
                created_by: User {
                    display_name: "Alice".to_owned(),
                },
            },
            version: Version {
                when: "2021-06-01T12:00:00.000Z".to_owned(),
                by: User {
                    display_name: "Bob".to_owned(),
                },
            },
            links: Links {
                base: "https://acme.atlassian.net/wiki".to_owned(),
            },
        }
    }

    #[test]
    fn test_record_id() {
        assert_eq!(record_id("DEV", "123"), "Confluence - DEV-123");
    }

    #[test]
    fn test_metadata_from_detail() {
        let metadata = PageMetadata::from_detail(&detail());

        assert_eq!(
            metadata,
            PageMetadata {
                id: "Confluence - Operations-4242".to_owned(),
                created_date: "2020-01-01T00:00:00.000Z".to_owned(),
                last_updated_date: "2021-06-01T12:00:00.000Z".to_owned(),
                title: "Runbook".to_owned(),
                creator: "Alice".to_owned(),
                last_modifier: "Bob".to_owned(),
                url: "https://acme.atlassian.net/wiki/spaces/OPS/pages/4242".to_owned(),
                space: "Operations".to_owned(),
            }
        );
    }

    #[test]
    fn test_metadata_from_sparse_detail() {
        let metadata = PageMetadata::from_detail(&PageDetail {
            id: "7".to_owned(),
            ..PageDetail::default()
        });

        assert_eq!(metadata.id, "Confluence - -7");
        assert_eq!(metadata.creator, "");
        assert_eq!(metadata.last_modifier, "");
        assert_eq!(metadata.url, "/spaces//pages/7");
    }

    #[test]
    fn test_into_record_keeps_metadata() {
        let record = PageMetadata::from_detail(&detail()).into_record("body".to_owned());
        assert_eq!(record.id, "Confluence - Operations-4242");
        assert_eq!(record.space, "Operations");
        assert_eq!(record.text, "body");
    }
}
