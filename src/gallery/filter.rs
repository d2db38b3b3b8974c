//! Gallery filtering: selected category AND free-text query.

use std::str::FromStr;

use crate::domain::ContentItem;

use super::facets::ALL_CATEGORIES;

/// Category chosen in the filter bar
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategorySelection {
    /// No category restriction
    #[default]
    All,

    /// Only items whose category equals this name exactly
    Named(String),
}

impl CategorySelection {
    pub fn matches(&self, item: &ContentItem) -> bool {
        match self {
            CategorySelection::All => true,
            CategorySelection::Named(name) => item.category == *name,
        }
    }
}

impl FromStr for CategorySelection {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == ALL_CATEGORIES {
            Ok(CategorySelection::All)
        } else {
            Ok(CategorySelection::Named(s.to_string()))
        }
    }
}

impl From<Option<String>> for CategorySelection {
    fn from(name: Option<String>) -> Self {
        match name {
            Some(name) if name != ALL_CATEGORIES => CategorySelection::Named(name),
            _ => CategorySelection::All,
        }
    }
}

/// Case-insensitive substring match against prompt and tags.
///
/// The query is matched literally, surrounding whitespace included. An
/// empty query matches every item.
pub fn matches_query(item: &ContentItem, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }

    let query_lower = query.to_lowercase();
    item.prompt.to_lowercase().contains(&query_lower)
        || item
            .tags
            .iter()
            .any(|t| t.to_lowercase().contains(&query_lower))
}

/// Combined gallery filter
#[derive(Debug, Clone, Default)]
pub struct GalleryFilter {
    pub category: CategorySelection,
    pub query: String,
}

impl GalleryFilter {
    pub fn new(category: CategorySelection, query: impl Into<String>) -> Self {
        Self {
            category,
            query: query.into(),
        }
    }

    pub fn matches(&self, item: &ContentItem) -> bool {
        self.category.matches(item) && matches_query(item, &self.query)
    }

    /// Items passing both filters, in pool order
    pub fn apply<'a>(&self, pool: &'a [ContentItem]) -> Vec<&'a ContentItem> {
        pool.iter().filter(|item| self.matches(item)).collect()
    }
}
