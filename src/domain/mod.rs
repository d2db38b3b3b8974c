//! Domain types for the gallery.
//!
//! - ContentItem: one gallery record (image + prompt + metadata)
//! - Counters: engagement metrics attached to an item

pub mod item;

// Re-export commonly used types
pub use item::{ContentId, ContentItem, Counters};
