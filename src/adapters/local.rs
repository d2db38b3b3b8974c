//! Backend serving the on-disk catalog.

use std::path::PathBuf;

use anyhow::Context;
use async_trait::async_trait;
use tracing::debug;

use super::{Backend, BackendError, BackendResult};
use crate::domain::{ContentId, ContentItem};
use crate::library::Catalog;

/// Local catalog backend (always authenticated)
pub struct LocalBackend {
    catalog_path: PathBuf,
}

impl LocalBackend {
    /// Backend over the catalog at `path`
    pub fn new(catalog_path: impl Into<PathBuf>) -> Self {
        Self {
            catalog_path: catalog_path.into(),
        }
    }

    /// Backend over the configured catalog location
    pub fn from_config() -> anyhow::Result<Self> {
        Ok(Self::new(crate::config::catalog_path()?))
    }

    async fn catalog(&self) -> BackendResult<Catalog> {
        let catalog = Catalog::load_from(&self.catalog_path)
            .await
            .with_context(|| format!("Failed to load {}", self.catalog_path.display()))?;
        Ok(catalog)
    }
}

#[async_trait]
impl Backend for LocalBackend {
    fn name(&self) -> &str {
        "local"
    }

    async fn fetch_all_items(&self) -> BackendResult<Vec<ContentItem>> {
        let catalog = self.catalog().await?;
        debug!(count = catalog.len(), "Loaded local catalog");
        Ok(catalog.list(None).into_iter().cloned().collect())
    }

    /// Exact id first, then the first item whose id starts with `id`
    async fn fetch_item_by_id(&self, id: &ContentId) -> BackendResult<ContentItem> {
        let catalog = self.catalog().await?;
        if let Some(item) = catalog.get(id) {
            return Ok(item.clone());
        }

        if id.as_str().is_empty() {
            return Err(BackendError::NotFound(id.clone()));
        }

        catalog
            .find_by_prefix(id.as_str())
            .cloned()
            .ok_or_else(|| BackendError::NotFound(id.clone()))
    }

    async fn is_authenticated(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use tempfile::TempDir;

    use super::*;

    #[tokio::test]
    async fn test_local_backend_fetch() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("catalog.json");

        let now = Utc::now();
        let mut catalog = Catalog::new();
        catalog.add(ContentItem::with_id("old", "p", "X").with_created_at(now - Duration::hours(1)));
        catalog.add(ContentItem::with_id("new", "p", "X").with_created_at(now));
        catalog.save_to(&path).await.unwrap();

        let backend = LocalBackend::new(&path);
        let items = backend.fetch_all_items().await.unwrap();
        assert_eq!(items[0].id.as_str(), "new");

        let item = backend.fetch_item_by_id(&"old".into()).await.unwrap();
        assert_eq!(item.id.as_str(), "old");

        let missing = backend.fetch_item_by_id(&"nope".into()).await;
        assert!(matches!(missing, Err(BackendError::NotFound(_))));
        assert!(backend.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_local_backend_id_prefix() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("catalog.json");

        let mut catalog = Catalog::new();
        catalog.add(ContentItem::with_id("ab12", "p", "X"));
        catalog.add(ContentItem::with_id("ab", "p", "X"));
        catalog.add(ContentItem::with_id("cd34", "p", "X"));
        catalog.save_to(&path).await.unwrap();

        let backend = LocalBackend::new(&path);

        // An exact id wins over a longer id sharing the prefix
        let item = backend.fetch_item_by_id(&"ab".into()).await.unwrap();
        assert_eq!(item.id.as_str(), "ab");

        let item = backend.fetch_item_by_id(&"cd".into()).await.unwrap();
        assert_eq!(item.id.as_str(), "cd34");

        let empty = backend.fetch_item_by_id(&"".into()).await;
        assert!(matches!(empty, Err(BackendError::NotFound(_))));
    }
}
