use crate::errors::{FoundryError, FoundryResult};
use bytes::Bytes;
use std::path::{Path, PathBuf};

/// Result of a generation call: the artifact in memory, or where it was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactOutput {
    Bytes(Bytes),
    Saved(PathBuf),
}

impl ArtifactOutput {
    pub fn bytes(&self) -> Option<&Bytes> {
        match self {
            ArtifactOutput::Bytes(bytes) => Some(bytes),
            ArtifactOutput::Saved(_) => None,
        }
    }

    pub fn into_bytes(self) -> Option<Bytes> {
        match self {
            ArtifactOutput::Bytes(bytes) => Some(bytes),
            ArtifactOutput::Saved(_) => None,
        }
    }

    pub fn saved_path(&self) -> Option<&Path> {
        match self {
            ArtifactOutput::Saved(path) => Some(path),
            ArtifactOutput::Bytes(_) => None,
        }
    }

    pub fn is_saved(&self) -> bool {
        matches!(self, ArtifactOutput::Saved(_))
    }
}

fn parent_dir(path: &Path) -> Option<&Path> {
    path.parent().filter(|p| !p.as_os_str().is_empty())
}

/// Writes `bytes` to `output` (creating parent directories) or hands them back.
pub async fn deliver(bytes: Bytes, output: Option<&Path>) -> FoundryResult<ArtifactOutput> {
    let Some(path) = output else {
        return Ok(ArtifactOutput::Bytes(bytes));
    };
    if let Some(parent) = parent_dir(path) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| FoundryError::io(parent, e))?;
    }
    tokio::fs::write(path, &bytes)
        .await
        .map_err(|e| FoundryError::io(path, e))?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "artifact saved");
    Ok(ArtifactOutput::Saved(path.to_path_buf()))
}

pub fn deliver_blocking(bytes: Bytes, output: Option<&Path>) -> FoundryResult<ArtifactOutput> {
    let Some(path) = output else {
        return Ok(ArtifactOutput::Bytes(bytes));
    };
    if let Some(parent) = parent_dir(path) {
        std::fs::create_dir_all(parent).map_err(|e| FoundryError::io(parent, e))?;
    }
    std::fs::write(path, &bytes).map_err(|e| FoundryError::io(path, e))?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "artifact saved");
    Ok(ArtifactOutput::Saved(path.to_path_buf()))
}
