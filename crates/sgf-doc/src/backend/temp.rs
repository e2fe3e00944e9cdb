//! Temporary files exchanged with the engine.
//!
//! Each file is held as a [`TempPath`], so it is removed when the guard
//! drops on any early return. On the normal path the guard is closed
//! explicitly and a failed deletion is reported.

use std::fs;
use std::path::Path;

use tempfile::{Builder, TempPath};
use tracing::warn;

use crate::error::ProtocolError;

const PREFIX: &str = "sgf-doc-";
const SUFFIX: &str = ".sgf";

/// A temporary SGF file owned by the backend.
#[derive(Debug)]
pub struct TempSgfFile {
    path: TempPath,
}

impl TempSgfFile {
    /// Creates an empty temporary file.
    pub fn create() -> Result<Self, ProtocolError> {
        let file = Builder::new()
            .prefix(PREFIX)
            .suffix(SUFFIX)
            .tempfile()
            .map_err(|source| ProtocolError::CreateTempFile { source })?;
        Ok(Self {
            path: file.into_temp_path(),
        })
    }

    /// Creates a temporary file holding `content`.
    pub fn with_content(content: &str) -> Result<Self, ProtocolError> {
        let file = Self::create()?;
        fs::write(file.path(), content).map_err(|source| ProtocolError::Write {
            path: file.display_path(),
            source,
        })?;
        Ok(file)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn display_path(&self) -> String {
        self.path.display().to_string()
    }

    /// Reads the file as UTF-8 text.
    pub fn read(&self) -> Result<String, ProtocolError> {
        fs::read_to_string(self.path()).map_err(|source| ProtocolError::Read {
            path: self.display_path(),
            source,
        })
    }

    /// Deletes the file.
    pub fn close(self) -> Result<(), ProtocolError> {
        let path = self.display_path();
        self.path.close().map_err(|source| {
            warn!(%path, error = %source, "failed to delete temporary file");
            ProtocolError::Delete { path, source }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_close_deletes() {
        let file = TempSgfFile::with_content("(;)").unwrap();
        let path = file.path().to_path_buf();
        assert_eq!(file.read().unwrap(), "(;)");
        file.close().unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_drop_deletes() {
        let path = {
            let file = TempSgfFile::create().unwrap();
            file.path().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[test]
    fn test_close_reports_missing_file() {
        let file = TempSgfFile::create().unwrap();
        fs::remove_file(file.path()).unwrap();
        let err = file.close().unwrap_err();
        assert!(matches!(err, ProtocolError::Delete { .. }));
    }
}
