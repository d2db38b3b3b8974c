//! Category Facet Integration Tests
//!
//! Tests for aggregation order, "show more" pagination, and filtering.

use progall::gallery::facets::visible;
use progall::{
    aggregate_categories, CategoryBucket, CategorySelection, ContentItem, FacetCursor,
    GalleryFilter,
};

fn pool(categories: &[&str]) -> Vec<ContentItem> {
    categories
        .iter()
        .enumerate()
        .map(|(i, c)| ContentItem::with_id(format!("item-{}", i), format!("prompt {}", i), *c))
        .collect()
}

#[test]
fn test_aggregate_small_pool() {
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
fn test_all_always_first() {
    // Even when one category covers the whole pool, "All" comes first
    let buckets = aggregate_categories(&pool(&["Z", "Z", "Z", "Z"]));
    assert_eq!(buckets[0], CategoryBucket::new("All", 4));
    assert_eq!(buckets[1], CategoryBucket::new("Z", 4));
}

#[test]
fn test_aggregate_is_idempotent() {
    let p = pool(&["B", "A", "B", "C", "A", "D"]);
    assert_eq!(aggregate_categories(&p), aggregate_categories(&p));
}

#[test]
fn test_show_more_cycle_over_25_buckets() {
    // 24 distinct categories + "All" = 25 buckets
    let categories: Vec<String> = (0..24).map(|i| format!("cat-{:02}", i)).collect();
    let refs: Vec<&str> = categories.iter().map(String::as_str).collect();
    let buckets = aggregate_categories(&pool(&refs));
    assert_eq!(buckets.len(), 25);

    let mut cursor = FacetCursor::new(10);
    let mut limits = vec![cursor.limit()];
    for _ in 0..3 {
        limits.push(cursor.show_more(buckets.len()));
    }
    assert_eq!(limits, vec![10, 20, 25, 10]);

    assert_eq!(cursor.visible(&buckets).len(), 10);
    assert_eq!(visible(&buckets, 25).len(), 25);
}

#[test]
fn test_selecting_facet_filters_pool() {
    let p = pool(&["X", "Y", "X"]);
    let buckets = aggregate_categories(&p);

    for bucket in &buckets {
        let selection: CategorySelection = bucket.name.parse().unwrap();
        let filtered = GalleryFilter::new(selection, "").apply(&p);
        assert_eq!(filtered.len(), bucket.count, "facet {}", bucket.name);
    }
}

#[test]
fn test_category_and_text_filters_are_anded() {
    let p = vec![
        ContentItem::with_id("1", "Neon samurai", "Anime"),
        ContentItem::with_id("2", "neon skyline", "Cyberpunk"),
        ContentItem::with_id("3", "quiet garden", "Anime").with_tag("NEON-free"),
        ContentItem::with_id("4", "forest spirit", "Anime"),
    ];

    let filter = GalleryFilter::new(CategorySelection::Named("Anime".to_string()), "neon");
    let ids: Vec<_> = filter.apply(&p).iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "3"]);
}
