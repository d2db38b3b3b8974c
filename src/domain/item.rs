//! Gallery content items.
//!
//! A `ContentItem` is read-only from the point of view of this crate:
//! uploads, edits and deletes happen in the hosted backend. Everything the
//! gallery derives from items is recomputed per call.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Opaque content identifier assigned by the backend
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentId(String);

impl ContentId {
    /// Wrap an existing identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh identifier for locally imported records
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Get the raw string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ContentId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ContentId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Engagement counters (all default to zero)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counters {
    #[serde(default, deserialize_with = "null_as_default")]
    pub downloads: u64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub copies: u64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub views: u64,
}

/// A single gallery entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentItem {
    /// Unique identifier within a pool
    pub id: ContentId,

    /// Free-text prompt used to generate the image
    #[serde(default, deserialize_with = "null_as_default")]
    pub prompt: String,

    /// Single classification label (empty string is a regular label)
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,

    /// Short labels, compared case-sensitively
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,

    /// Full-size image locator
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,

    /// Thumbnail locator
    #[serde(default, deserialize_with = "null_as_default")]
    pub thumbnail: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub is_featured: bool,

    /// Engagement metrics, stored flat alongside the record
    #[serde(flatten)]
    pub counters: Counters,

    /// When the item was uploaded
    #[serde(default)]
    pub created_at: DateTime<Utc>,
}

impl ContentItem {
    /// Create a new item with a fresh id
    pub fn new(prompt: impl Into<String>, category: impl Into<String>) -> Self {
        Self::with_id(ContentId::generate(), prompt, category)
    }

    /// Create a new item with a known id
    pub fn with_id(
        id: impl Into<ContentId>,
        prompt: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            prompt: prompt.into(),
            category: category.into(),
            tags: Vec::new(),
            url: String::new(),
            thumbnail: String::new(),
            is_featured: false,
            counters: Counters::default(),
            created_at: Utc::now(),
        }
    }

    /// Add a tag
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Add multiple tags
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Set image and thumbnail locators
    pub fn with_urls(mut self, url: impl Into<String>, thumbnail: impl Into<String>) -> Self {
        self.url = url.into();
        self.thumbnail = thumbnail.into();
        self
    }

    /// Mark as featured
    pub fn featured(mut self) -> Self {
        self.is_featured = true;
        self
    }

    pub fn with_counters(mut self, counters: Counters) -> Self {
        self.counters = counters;
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }
}

/// Treat an explicit JSON `null` the same as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
