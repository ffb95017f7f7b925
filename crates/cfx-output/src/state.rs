//! Run state persisted between extractions.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::OutputError;

/// State carried from one run to the next.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunState {
    /// Start time of the last successful run, `YYYY-MM-DDTHH:MM:SS.mmmZ`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_run: Option<String>,
}

impl RunState {
    /// State recording a successful run that started at `last_run`.
    pub fn new(last_run: impl Into<String>) -> Self {
        Self {
            last_run: Some(last_run.into()),
        }
    }

    /// Read state from `path`. A missing or blank file yields the empty state.
    pub fn read(path: &Path) -> Result<Self, OutputError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No state file at {}", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(OutputError::io(path, e)),
        };

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_json::from_str(&content).map_err(|source| OutputError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write state to `path`, creating parent directories.
    pub fn write(&self, path: &Path) -> Result<(), OutputError> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|e| OutputError::io(dir, e))?;
        }
        let json = serde_json::to_vec(self).map_err(|source| OutputError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json).map_err(|e| OutputError::io(path, e))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_read_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let state = RunState::read(&dir.path().join("in/state.json")).unwrap();
        assert_eq!(state, RunState::default());
    }

    #[test]
    fn test_read_blank_and_empty_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        fs::write(&path, "  \n").unwrap();
        assert_eq!(RunState::read(&path).unwrap().last_run, None);

        fs::write(&path, "{}").unwrap();
        assert_eq!(RunState::read(&path).unwrap().last_run, None);
    }

    #[test]
    fn test_read_ignores_unknown_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(
            &path,
            r#"{"last_run": "2024-05-01T10:00:00.000Z", "component": {"x": 1}}"#,
        )
        .unwrap();

        let state = RunState::read(&path).unwrap();

        assert_eq!(state.last_run.as_deref(), Some("2024-05-01T10:00:00.000Z"));
    }

    #[test]
    fn test_read_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "{not json").unwrap();

        let err = RunState::read(&path).unwrap_err();

        assert!(matches!(err, OutputError::Json { .. }));
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/state.json");

        RunState::new("2024-05-01T10:00:00.123Z").write(&path).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            r#"{"last_run":"2024-05-01T10:00:00.123Z"}"#
        );
        assert_eq!(
            RunState::read(&path).unwrap(),
            RunState::new("2024-05-01T10:00:00.123Z")
        );
    }
}
