//! Data directory layout.

use std::path::{Path, PathBuf};

/// Name of the pages table.
pub const PAGES_TABLE: &str = "confluence_pages";

/// Paths inside a data directory.
#[derive(Debug, Clone)]
pub struct DataDir {
    root: PathBuf,
}

impl DataDir {
    /// Wrap a data directory root. Nothing is created on disk.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// State written by the previous run.
    pub fn input_state(&self) -> PathBuf {
        self.root.join("in").join("state.json")
    }

    /// State for the next run.
    pub fn output_state(&self) -> PathBuf {
        self.root.join("out").join("state.json")
    }

    /// Directory holding output tables.
    pub fn tables_dir(&self) -> PathBuf {
        self.root.join("out").join("tables")
    }

    /// CSV file of a table.
    pub fn table(&self, name: &str) -> PathBuf {
        self.tables_dir().join(format!("{name}.csv"))
    }

    /// Manifest file of a table.
    pub fn manifest(&self, name: &str) -> PathBuf {
        self.tables_dir().join(format!("{name}.csv.manifest"))
    }
}
