//! progall - Prompt gallery core
//!
//! Browsing, searching, and ranking logic for a gallery of AI-generated
//! images and the prompts that produced them.
//!
//! # Architecture
//!
//! The gallery logic is a set of pure functions over an in-memory pool:
//! - Related items are ranked by category, shared tags, and shared prompt words
//! - Category facets are counted and revealed a page at a time
//! - Pools are filtered by category and free-text query
//!
//! Pools come from a `Backend`: the local catalog file or a hosted REST table.
//!
//! # Modules
//!
//! - `adapters`: Data sources (local catalog, hosted REST backend)
//! - `analytics`: Dashboard summaries
//! - `domain`: Data structures (ContentItem)
//! - `gallery`: Ranking, facets, filtering
//! - `library`: On-disk catalog
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Load items into the local catalog
//! progall import items.json
//!
//! # Items related to one image
//! progall related <content-id>
//!
//! # Category facets, expanded once
//! progall categories --expand 1
//! ```

pub mod adapters;
pub mod analytics;
pub mod cli;
pub mod config;
pub mod domain;
pub mod gallery;
pub mod library;

// Re-export main types at crate root for convenience
pub use adapters::{Backend, BackendError, LocalBackend, RestBackend};
pub use domain::{ContentId, ContentItem, Counters};
pub use gallery::{
    aggregate_categories, rank, CategoryBucket, CategorySelection, FacetCursor, GalleryFilter,
    RankedItem, Score,
};
pub use library::Catalog;
