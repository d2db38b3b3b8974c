//! Gallery view logic.
//!
//! Pure functions over an in-memory pool, called after the backend has
//! delivered the items:
//!
//! - `ranker`: related-content ranking for a focal item
//! - `facets`: category counts and the "show more" cursor
//! - `filter`: category + free-text filtering

pub mod facets;
pub mod filter;
pub mod ranker;

pub use facets::{aggregate_categories, CategoryBucket, FacetCursor, ALL_CATEGORIES};
pub use filter::{CategorySelection, GalleryFilter};
pub use ranker::{rank, rank_scored, RankedItem, Score};
