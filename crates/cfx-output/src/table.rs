//! CSV table writer.

use std::fs;
use std::path::{Path, PathBuf};

use cfx_confluence::PageRecord;
use tempfile::NamedTempFile;
use tracing::info;

use crate::error::OutputError;

/// Streams page records into a CSV table.
///
/// Rows go to a temporary file next to the target. The table appears at its
/// final path only when [`TableWriter::finish`] succeeds; dropping the writer
/// earlier discards everything written so far.
pub struct TableWriter {
    writer: csv::Writer<NamedTempFile>,
    target: PathBuf,
    rows: usize,
}

impl TableWriter {
    /// Start a table at `target`, creating its directory and writing the header.
    pub fn create(target: &Path) -> Result<Self, OutputError> {
        let dir = target.parent().unwrap_or(Path::new("."));
        fs::create_dir_all(dir).map_err(|e| OutputError::io(dir, e))?;
        let tmp = NamedTempFile::new_in(dir).map_err(|e| OutputError::io(dir, e))?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(tmp);
        writer.write_record(PageRecord::HEADER)?;

        Ok(Self {
            writer,
            target: target.to_path_buf(),
            rows: 0,
        })
    }

    /// Append one row.
    pub fn write(&mut self, record: &PageRecord) -> Result<(), OutputError> {
        self.writer.serialize(record)?;
        self.rows += 1;
        Ok(())
    }

    /// Rows written so far.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Flush and move the table into place, replacing any previous file.
    pub fn finish(self) -> Result<PathBuf, OutputError> {
        let Self {
            mut writer,
            target,
            rows,
        } = self;

        writer.flush().map_err(|e| OutputError::io(&target, e))?;
        let tmp = writer
            .into_inner()
            .map_err(|e| OutputError::io(&target, std::io::Error::other(e.to_string())))?;
        tmp.as_file()
            .sync_all()
            .map_err(|e| OutputError::io(tmp.path(), e))?;
        tmp.persist(&target)
            .map_err(|e| OutputError::io(&target, e.error))?;

        info!("Wrote {} rows to {}", rows, target.display());
        Ok(target)
    }
}
