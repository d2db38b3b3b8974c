//! Catalog of gallery items kept on local disk.
//!
//! Simple JSON-based pool that can be searched and filtered.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::debug;

use crate::domain::{ContentId, ContentItem};
use crate::gallery::filter::matches_query;

/// Current on-disk format version
const CATALOG_VERSION: u32 = 1;

/// Catalog of all known gallery items
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    /// Catalog format version
    pub version: u32,

    /// All cataloged items
    #[serde(default)]
    pub items: Vec<ContentItem>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    /// Create a new empty catalog
    pub fn new() -> Self {
        Self {
            version: CATALOG_VERSION,
            items: Vec::new(),
        }
    }

    /// Get the catalog file path
    pub fn catalog_path() -> Result<PathBuf> {
        crate::config::catalog_path()
    }

    /// Load the catalog from the configured location
    pub async fn load() -> Result<Self> {
        Self::load_from(&Self::catalog_path()?).await
    }

    /// Load a catalog file; a missing file is an empty catalog
    pub async fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No catalog file, starting empty");
            return Ok(Self::new());
        }

        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read catalog: {}", path.display()))?;

        serde_json::from_str(&content).context("Failed to parse catalog JSON")
    }

    /// Save the catalog to the configured location
    pub async fn save(&self) -> Result<()> {
        self.save_to(&Self::catalog_path()?).await
    }

    /// Save the catalog atomically, holding an exclusive lock while writing
    pub async fn save_to(&self, path: &Path) -> Result<()> {
        let parent = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        fs::create_dir_all(&parent).await?;

        let content = serde_json::to_string_pretty(self)?;
        let path = path.to_path_buf();

        tokio::task::spawn_blocking(move || write_locked(&parent, &path, content.as_bytes()))
            .await
            .context("Catalog writer task panicked")?
    }

    /// Add an item, replacing any existing item with the same id
    pub fn add(&mut self, item: ContentItem) {
        if let Some(existing) = self.items.iter_mut().find(|i| i.id == item.id) {
            *existing = item;
        } else {
            self.items.push(item);
        }
    }

    /// Add every item from a JSON array, returning how many were read
    pub fn import_json(&mut self, json: &str) -> Result<usize> {
        let items: Vec<ContentItem> =
            serde_json::from_str(json).context("Failed to parse items JSON array")?;
        let count = items.len();

        for item in items {
            self.add(item);
        }

        Ok(count)
    }

    /// Get an item by ID
    pub fn get(&self, id: &ContentId) -> Option<&ContentItem> {
        self.items.iter().find(|i| &i.id == id)
    }

    /// Find an item by ID prefix (first match in pool order)
    pub fn find_by_prefix(&self, prefix: &str) -> Option<&ContentItem> {
        self.items.iter().find(|i| i.id.as_str().starts_with(prefix))
    }

    /// Remove an item by ID
    pub fn remove(&mut self, id: &ContentId) -> Option<ContentItem> {
        let pos = self.items.iter().position(|i| &i.id == id)?;
        Some(self.items.remove(pos))
    }

    /// Search items by query (case-insensitive substring of prompt or tags)
    pub fn search(&self, query: &str) -> Vec<&ContentItem> {
        self.items
            .iter()
            .filter(|item| matches_query(item, query))
            .collect()
    }

    /// Filter items by exact category
    pub fn filter_by_category(&self, category: &str) -> Vec<&ContentItem> {
        self.items
            .iter()
            .filter(|item| item.category == category)
            .collect()
    }

    /// Get all items sorted by created_at (most recent first)
    pub fn list(&self, limit: Option<usize>) -> Vec<&ContentItem> {
        let mut items: Vec<_> = self.items.iter().collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        if let Some(limit) = limit {
            items.truncate(limit);
        }

        items
    }

    /// Get the number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Write `bytes` to `path` through a temp file in `dir`, under `<path>.lock`
fn write_locked(dir: &Path, path: &Path, bytes: &[u8]) -> Result<()> {
    let lock_path = path.with_extension("lock");
    let lock = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .open(&lock_path)
        .with_context(|| format!("Failed to open lock file: {}", lock_path.display()))?;

    lock.lock_exclusive()
        .context("Failed to acquire catalog lock")?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temp file in {}", dir.display()))?;
    tmp.write_all(bytes)?;
    tmp.persist(path)
        .with_context(|| format!("Failed to write catalog: {}", path.display()))?;

    FileExt::unlock(&lock).context("Failed to release catalog lock")?;
    Ok(())
}
