use std::io::ErrorKind;
use std::path::PathBuf;
use async_trait::async_trait;
use tracing::{debug, instrument};

use super::{Storage, StoreError};

/// A single text file on disk.
///
/// Writes go to a sibling temp file first and are renamed into place, so a
/// reader never observes a half-written file.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.path.with_file_name(format!(".{}.tmp", name))
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io { path: self.path.clone(), source }
    }
}

#[async_trait]
impl Storage for FileStorage {
    #[instrument(skip(self))]
    async fn read_all(&self) -> Result<Option<String>, StoreError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "File not present");
                Ok(None)
            }
            Err(e) => Err(self.io_error(e)),
        }
    }

    #[instrument(skip(self, contents))]
    async fn write_all(&self, contents: &str) -> Result<(), StoreError> {
        let temp = self.temp_path();
        tokio::fs::write(&temp, contents).await.map_err(|e| self.io_error(e))?;
        tokio::fs::rename(&temp, &self.path).await.map_err(|e| self.io_error(e))?;
        debug!(path = %self.path.display(), bytes = contents.len(), "File written");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn remove(&self) -> Result<(), StoreError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }
}
