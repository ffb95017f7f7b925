//! Confluence page types.

use serde::Deserialize;

/// One batch of a space's page listing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PageBatch {
    /// Pages in this batch.
    pub results: Vec<PageSummary>,
}

/// Page as returned by the space content listing (with `body.storage` expanded).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PageSummary {
    /// Page ID.
    pub id: Option<String>,
    /// Page title.
    pub title: String,
    /// Page body content.
    pub body: Option<Body>,
}

impl PageSummary {
    /// Raw storage-format body, or an empty string when the body was not expanded.
    pub fn storage_value(&self) -> &str {
        self.body
            .as_ref()
            .and_then(|b| b.storage.as_ref())
            .map_or("", |s| s.value.as_str())
    }
}

/// Page body content.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Body {
    /// Storage format content.
    pub storage: Option<Storage>,
}

/// Storage format representation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Storage {
    /// HTML content in Confluence storage format.
    pub value: String,
}

/// Page returned by the single-page lookup with `space`, `history` and
/// `version` expanded.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PageDetail {
    /// Page ID.
    pub id: String,
    /// Page title.
    pub title: String,
    /// Owning space.
    pub space: SpaceRef,
    /// Creation information.
    pub history: History,
    /// Latest version information.
    pub version: Version,
    /// Hypermedia links.
    #[serde(rename = "_links")]
    pub links: Links,
}

/// Space reference embedded in a page.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SpaceRef {
    /// Space key.
    pub key: String,
    /// Space display name.
    pub name: String,
}

/// Page history.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct History {
    /// Creation timestamp.
    pub created_date: String,
    /// Page author.
    pub created_by: User,
}

/// Page version.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Version {
    /// Timestamp of this version.
    pub when: String,
    /// Author of this version.
    pub by: User,
}

/// Confluence user reference.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct User {
    /// Display name.
    pub display_name: String,
}

/// Hypermedia links.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Links {
    /// Site base URL (e.g. `https://acme.atlassian.net/wiki`).
    pub base: String,
}
