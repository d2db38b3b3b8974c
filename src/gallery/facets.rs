//! Category facets for the gallery filter bar.
//!
//! Aggregation is a pure function of the pool. How many facets are shown is
//! caller-owned state kept in a [`FacetCursor`].

use std::collections::HashMap;

use serde::Serialize;

use crate::domain::ContentItem;

/// Name of the synthetic facet covering the whole pool
pub const ALL_CATEGORIES: &str = "All";

/// Facets revealed per "show more" activation
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Number of items carrying a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryBucket {
    pub name: String,
    pub count: usize,
}

impl CategoryBucket {
    pub fn new(name: impl Into<String>, count: usize) -> Self {
        Self {
            name: name.into(),
            count,
        }
    }
}

/// Count items per category, most frequent first.
///
/// Categories are matched exactly. Ties keep the order in which the
/// categories were first seen. The result always starts with an
/// `("All", pool.len())` bucket.
pub fn aggregate_categories(pool: &[ContentItem]) -> Vec<CategoryBucket> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut buckets: Vec<CategoryBucket> = Vec::new();

    for item in pool {
        match index.get(item.category.as_str()) {
            Some(&pos) => buckets[pos].count += 1,
            None => {
                index.insert(item.category.as_str(), buckets.len());
                buckets.push(CategoryBucket::new(item.category.clone(), 1));
            }
        }
    }

    // Stable: equal counts stay in encounter order
    buckets.sort_by(|a, b| b.count.cmp(&a.count));

    let mut result = Vec::with_capacity(buckets.len() + 1);
    result.push(CategoryBucket::new(ALL_CATEGORIES, pool.len()));
    result.extend(buckets);
    result
}

/// The facets visible under the current limit
pub fn visible(buckets: &[CategoryBucket], limit: usize) -> &[CategoryBucket] {
    &buckets[..limit.min(buckets.len())]
}

/// "Show more" state for the facet list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FacetCursor {
    page_size: usize,
    limit: usize,
}

impl Default for FacetCursor {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl FacetCursor {
    /// Start collapsed, showing one page
    pub fn new(page_size: usize) -> Self {
        let page_size = page_size.max(1);
        Self {
            page_size,
            limit: page_size,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Whether the next activation reveals more rather than collapsing
    pub fn has_more(&self, total: usize) -> bool {
        self.limit < total
    }

    /// Reveal another page, or collapse back to one page once everything is shown
    pub fn show_more(&mut self, total: usize) -> usize {
        self.limit = if self.has_more(total) {
            (self.limit + self.page_size).min(total)
        } else {
            self.page_size
        };
        self.limit
    }

    /// Facets visible at the current limit
    pub fn visible<'a>(&self, buckets: &'a [CategoryBucket]) -> &'a [CategoryBucket] {
        visible(buckets, self.limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(categories: &[&str]) -> Vec<ContentItem> {
        categories
            .iter()
            .enumerate()
            .map(|(i, c)| ContentItem::with_id(format!("id{}", i), "", *c))
            .collect()
    }

    #[test]
    fn test_aggregate_counts() {
        let buckets = aggregate_categories(&pool(&["X", "Y", "X"]));
        assert_eq!(
            buckets,
            vec![
                CategoryBucket::new("All", 3),
                CategoryBucket::new("X", 2),
                CategoryBucket::new("Y", 1),
            ]
        );
    }

    #[test]
    fn test_aggregate_ties_keep_encounter_order() {
        let buckets = aggregate_categories(&pool(&["B", "A", "C", "A", "B"]));
        let names: Vec<_> = buckets.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["All", "B", "A", "C"]);
    }

    #[test]
    fn test_aggregate_is_exact_match() {
        let buckets = aggregate_categories(&pool(&["anime", "Anime", " Anime", ""]));
        assert_eq!(buckets.len(), 5);
        assert!(buckets.iter().any(|b| b.name.is_empty() && b.count == 1));
    }

    #[test]
    fn test_aggregate_empty_pool() {
        assert_eq!(aggregate_categories(&[]), vec![CategoryBucket::new("All", 0)]);
    }

    #[test]
    fn test_visible_clamps() {
        let buckets = aggregate_categories(&pool(&["X", "Y"]));
        assert_eq!(visible(&buckets, 2).len(), 2);
        assert_eq!(visible(&buckets, 10).len(), 3);
        assert!(visible(&buckets, 0).is_empty());
    }

    #[test]
    fn test_cursor_wraps_after_full_length() {
        let mut cursor = FacetCursor::new(10);
        assert_eq!(cursor.limit(), 10);
        assert_eq!(cursor.show_more(25), 20);
        assert_eq!(cursor.show_more(25), 25);
        assert!(!cursor.has_more(25));
        assert_eq!(cursor.show_more(25), 10);
    }

    #[test]
    fn test_cursor_short_list_toggles_to_page_size() {
        let mut cursor = FacetCursor::new(10);
        assert!(!cursor.has_more(4));
        assert_eq!(cursor.show_more(4), 10);
    }

    #[test]
    fn test_cursor_zero_page_size() {
        let cursor = FacetCursor::new(0);
        assert_eq!(cursor.page_size(), 1);
    }
}
