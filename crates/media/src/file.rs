//! Raw file-like inputs handed over by the presentation layer.

use std::path::PathBuf;

use itemforge_core::{DomainError, DomainResult};

/// Where the bytes of a selected file live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSource {
    /// Already in memory (e.g. read by a browser or a test).
    Bytes(Vec<u8>),
    /// On the local filesystem; read lazily by the decode task.
    Path(PathBuf),
}

/// A file selected by the user, not yet decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFile {
    name: String,
    source: FileSource,
}

impl RawFile {
    pub fn from_bytes(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            source: FileSource::Bytes(bytes.into()),
        }
    }

    /// The display name is the final path component.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Self {
            name,
            source: FileSource::Path(path),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &FileSource {
        &self.source
    }

    /// Load the file contents.
    pub async fn read(self) -> DomainResult<Vec<u8>> {
        match self.source {
            FileSource::Bytes(bytes) => Ok(bytes),
            FileSource::Path(path) => tokio::fs::read(&path)
                .await
                .map_err(|e| DomainError::decode(format!("{}: {e}", self.name))),
        }
    }
}
