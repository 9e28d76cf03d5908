//! Collection source backed by a directory of cube exports
//!
//! `<root>/<cube id>.json` holds the Cube Cobra export for one cube. Loading
//! is the only async boundary of the game: the engine receives either a
//! ready repository or an error, and a failed load never touches a session.

use crate::core::CardRepository;
use crate::loader::CubeLoader;
use crate::{CubeError, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Loads cubes by identifier from a directory
#[derive(Debug, Clone)]
pub struct CubeDirectory {
    root: PathBuf,
}

impl CubeDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        CubeDirectory { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the export for `cube_id`, or None for an unusable identifier
    pub fn path_for(&self, cube_id: &str) -> Option<PathBuf> {
        let id = cube_id.trim();
        if id.is_empty() || id.contains(['/', '\\']) || id.starts_with('.') {
            return None;
        }
        Some(self.root.join(format!("{id}.json")))
    }

    /// Load a cube by identifier
    pub async fn load(&self, cube_id: &str) -> Result<Arc<CardRepository>> {
        let id = cube_id.trim();
        let path = self
            .path_for(id)
            .ok_or_else(|| CubeError::CollectionNotFound(id.to_string()))?;

        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(CubeError::CollectionNotFound(id.to_string()))
            }
            Err(e) => {
                return Err(CubeError::CollectionUnavailable(format!(
                    "failed to read {}: {e}",
                    path.display()
                )))
            }
        };

        let repo = CubeLoader::parse(&content).map_err(|e| {
            CubeError::CollectionUnavailable(format!("invalid cube data for \"{id}\": {e}"))
        })?;

        if repo.is_empty() {
            return Err(CubeError::EmptyCollection(id.to_string()));
        }
        Ok(Arc::new(repo))
    }
}
