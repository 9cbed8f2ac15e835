// src/infrastructure/artifact_workspace.rs
//
// Artifact Workspace Management
//
// CRITICAL RULES:
// - One workspace per resolution request
// - Workspace directories never collide, even for the same coordinate
// - A workspace that is not retained is removed on drop
// - Cleanup only ever deletes inside the cache root

use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Request-scoped storage for a downloaded artifact
///
/// INVARIANTS:
/// - Each workspace has a unique ID and directory
/// - Nothing outside `cache_root` is ever removed
#[derive(Debug)]
pub struct ArtifactWorkspace {
    /// Unique workspace identifier (the request id)
    pub id: Uuid,

    /// Root all workspaces live under
    pub cache_root: PathBuf,

    /// `<cache_root>/<id>`
    pub workspace_dir: PathBuf,

    retained: bool,
    is_cleaned: bool,
}

/// A file written into a workspace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredArtifact {
    pub path: PathBuf,
    pub size_bytes: u64,
    pub sha256: String,
}

impl ArtifactWorkspace {
    /// Create the workspace directory for a request
    pub fn create(cache_root: &Path, id: Uuid) -> AppResult<Self> {
        let workspace_dir = cache_root.join(id.to_string());
        fs::create_dir_all(&workspace_dir)?;

        Ok(Self {
            id,
            cache_root: cache_root.to_path_buf(),
            workspace_dir,
            retained: false,
            is_cleaned: false,
        })
    }

    /// Write artifact content into the workspace
    pub fn store(&self, file_name: &str, content: &[u8]) -> AppResult<StoredArtifact> {
        if file_name.is_empty() || file_name.contains(['/', '\\']) || file_name == ".." {
            return Err(AppError::Other(format!("Invalid artifact file name: {:?}", file_name)));
        }
        if self.is_cleaned {
            return Err(AppError::Other("Workspace has been cleaned".to_string()));
        }

        let path = self.workspace_dir.join(file_name);
        fs::write(&path, content)?;

        let mut hasher = Sha256::new();
        hasher.update(content);

        Ok(StoredArtifact {
            path,
            size_bytes: content.len() as u64,
            sha256: format!("{:x}", hasher.finalize()),
        })
    }

    /// Keep the workspace on disk after drop. Called once an artifact is
    /// handed to the caller.
    pub fn retain(mut self) -> PathBuf {
        self.retained = true;
        self.workspace_dir.clone()
    }

    /// Remove the workspace directory and everything in it
    pub fn cleanup(&mut self) -> AppResult<()> {
        if self.is_cleaned {
            return Ok(());
        }

        if !self.workspace_dir.starts_with(&self.cache_root) || self.workspace_dir == self.cache_root {
            return Err(AppError::Other(
                "Workspace directory is not inside the cache root".to_string(),
            ));
        }

        if self.workspace_dir.exists() {
            fs::remove_dir_all(&self.workspace_dir)?;
        }

        self.is_cleaned = true;
        Ok(())
    }
}

impl Drop for ArtifactWorkspace {
    fn drop(&mut self) {
        if !self.retained && !self.is_cleaned {
            if let Err(e) = self.cleanup() {
                log::warn!("failed to clean workspace {}: {}", self.workspace_dir.display(), e);
            }
        }
    }
}
