//! File-system catalog loading
//!
//! Repository layout on disk:
//!
//! ```text
//! <root>/
//!   rulesets/   one RuleSet per YAML file
//!   actions/    one ActionDef per YAML file
//!   workflows/  one Workflow per YAML file
//! ```
//!
//! Missing subdirectories are fine; malformed files abort the load with
//! an error naming the file.

use crate::catalog::Catalog;
use crate::error::{CatalogError, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};
use verdict_core::{ActionDef, RuleSet, Workflow};

/// Anything that can populate a catalog
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Load all artifacts from this source into the catalog, returning
    /// the number of artifacts loaded.
    async fn load_into(&self, catalog: &Catalog) -> Result<usize>;
}

/// Loads a catalog from a YAML repository directory
pub struct FileSystemCatalog {
    root: PathBuf,
}

impl FileSystemCatalog {
    /// Create a loader over a repository root directory
    pub fn new<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        if !root.is_dir() {
            return Err(CatalogError::InvalidPath { path: root });
        }
        Ok(Self { root })
    }

    /// Convenience: create a loader and load a fresh catalog in one step
    pub async fn load<P: AsRef<Path>>(root: P) -> Result<Catalog> {
        let loader = Self::new(root)?;
        let catalog = Catalog::new();
        let count = loader.load_into(&catalog).await?;
        info!(count, "catalog loaded from file system");
        Ok(catalog)
    }

    async fn load_dir<T, F>(&self, subdir: &str, mut store: F) -> Result<usize>
    where
        T: DeserializeOwned,
        F: FnMut(T) -> Result<()>,
    {
        let dir = self.root.join(subdir);
        if !dir.is_dir() {
            debug!(dir = %dir.display(), "catalog subdirectory absent, skipping");
            return Ok(0);
        }

        let mut count = 0;
        let mut entries = fs::read_dir(&dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if !is_yaml(&path) {
                continue;
            }
            let text = fs::read_to_string(&path).await?;
            let artifact: T = serde_yaml::from_str(&text).map_err(|e| CatalogError::File {
                path: path.clone(),
                message: e.to_string(),
            })?;
            store(artifact).map_err(|e| CatalogError::File {
                path: path.clone(),
                message: e.to_string(),
            })?;
            debug!(file = %path.display(), "loaded catalog artifact");
            count += 1;
        }
        Ok(count)
    }
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

#[async_trait]
impl CatalogSource for FileSystemCatalog {
    async fn load_into(&self, catalog: &Catalog) -> Result<usize> {
        let mut total = 0;
        total += self
            .load_dir::<RuleSet, _>("rulesets", |rs| catalog.upsert_ruleset(rs).map(|_| ()))
            .await?;
        total += self
            .load_dir::<ActionDef, _>("actions", |a| catalog.upsert_action(a))
            .await?;
        total += self
            .load_dir::<Workflow, _>("workflows", |w| catalog.upsert_workflow(w))
            .await?;
        Ok(total)
    }
}
