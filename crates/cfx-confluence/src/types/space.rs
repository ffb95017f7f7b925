//! Confluence space types.

use serde::Deserialize;

/// Confluence space.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Space {
    /// Space key (e.g. `DEV`).
    pub key: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
}

impl Space {
    /// Create a space from key and display name.
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
        }
    }
}

/// Space listing API response.
#[derive(Debug, Clone, Deserialize)]
pub struct SpacesResponse {
    /// Spaces visible to the authenticated user.
    #[serde(default)]
    pub results: Vec<Space>,
}
