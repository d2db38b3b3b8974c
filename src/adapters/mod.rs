//! Backend interfaces for the gallery's persistence/auth collaborator.
//!
//! The gallery only reads: fetching the pool, fetching one item, and
//! checking for a session. Uploads, edits and deletes belong to the
//! hosted backend and are not exposed here.

pub mod local;
pub mod rest;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{ContentId, ContentItem};

pub use local::LocalBackend;
pub use rest::{RestBackend, RestConfig};

/// Errors surfaced by a backend
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Content not found: {0}")]
    NotFound(ContentId),

    #[error("Not authorized: {0}")]
    Unauthorized(String),

    #[error("Backend request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result alias for backend calls
pub type BackendResult<T> = std::result::Result<T, BackendError>;

/// Trait for gallery data sources
#[async_trait]
pub trait Backend: Send + Sync {
    /// Human-readable backend name
    fn name(&self) -> &str;

    /// Fetch the whole pool, newest first
    async fn fetch_all_items(&self) -> BackendResult<Vec<ContentItem>>;

    /// Fetch a single item
    async fn fetch_item_by_id(&self, id: &ContentId) -> BackendResult<ContentItem>;

    /// Whether a user session is present
    async fn is_authenticated(&self) -> bool;
}
