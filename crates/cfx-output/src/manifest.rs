//! Table manifest.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::OutputError;

/// Load instructions stored next to an output table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableManifest {
    /// Columns identifying a row.
    pub primary_key: Vec<String>,
    /// Append/upsert into the destination instead of replacing it.
    pub incremental: bool,
}

impl TableManifest {
    /// Manifest for the pages table, keyed by `id`.
    pub fn pages(incremental: bool) -> Self {
        Self {
            primary_key: vec!["id".to_owned()],
            incremental,
        }
    }

    /// Write the manifest as JSON.
    pub fn write(&self, path: &Path) -> Result<(), OutputError> {
        let json = serde_json::to_vec_pretty(self).map_err(|source| OutputError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json).map_err(|e| OutputError::io(path, e))
    }
}
