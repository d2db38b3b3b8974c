//! Summaries for the admin dashboard.

use std::collections::HashSet;
use std::str::FromStr;

use serde::Serialize;

use crate::domain::ContentItem;

/// Engagement metric to order by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Downloads,
    Copies,
    Views,
}

impl Metric {
    pub fn of(&self, item: &ContentItem) -> u64 {
        match self {
            Metric::Downloads => item.counters.downloads,
            Metric::Copies => item.counters.copies,
            Metric::Views => item.counters.views,
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Metric::Downloads => write!(f, "downloads"),
            Metric::Copies => write!(f, "copies"),
            Metric::Views => write!(f, "views"),
        }
    }
}

impl FromStr for Metric {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "downloads" | "download" => Ok(Metric::Downloads),
            "copies" | "copy" => Ok(Metric::Copies),
            "views" | "view" => Ok(Metric::Views),
            _ => anyhow::bail!("Unknown metric: {}", s),
        }
    }
}

/// Pool-wide totals
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total_items: usize,
    pub featured_items: usize,
    pub categories: usize,
    pub downloads: u64,
    pub copies: u64,
    pub views: u64,
}

impl DashboardStats {
    pub fn from_pool(pool: &[ContentItem]) -> Self {
        let categories: HashSet<&str> = pool.iter().map(|i| i.category.as_str()).collect();

        pool.iter().fold(
            Self {
                total_items: pool.len(),
                categories: categories.len(),
                ..Default::default()
            },
            |mut stats, item| {
                if item.is_featured {
                    stats.featured_items += 1;
                }
                stats.downloads += item.counters.downloads;
                stats.copies += item.counters.copies;
                stats.views += item.counters.views;
                stats
            },
        )
    }
}

/// Highest `metric` first; equal values keep pool order
pub fn top_by(pool: &[ContentItem], metric: Metric, limit: usize) -> Vec<&ContentItem> {
    let mut items: Vec<&ContentItem> = pool.iter().collect();
    items.sort_by(|a, b| metric.of(b).cmp(&metric.of(a)));
    items.truncate(limit);
    items
}

/// Most recently created first
pub fn recent(pool: &[ContentItem], limit: usize) -> Vec<&ContentItem> {
    let mut items: Vec<&ContentItem> = pool.iter().collect();
    items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    items.truncate(limit);
    items
}

/// Featured items, newest first
pub fn featured(pool: &[ContentItem]) -> Vec<&ContentItem> {
    let mut items: Vec<&ContentItem> = pool.iter().filter(|i| i.is_featured).collect();
    items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    items
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;
    use crate::domain::Counters;

    fn item(id: &str, category: &str, downloads: u64, views: u64) -> ContentItem {
        ContentItem::with_id(id, "", category).with_counters(Counters {
            downloads,
            copies: 1,
            views,
        })
    }

    #[test]
    fn test_dashboard_totals() {
        let pool = vec![
            item("a", "X", 5, 10),
            item("b", "Y", 2, 0).featured(),
            item("c", "X", 0, 3),
        ];
        let stats = DashboardStats::from_pool(&pool);

        assert_eq!(stats.total_items, 3);
        assert_eq!(stats.featured_items, 1);
        assert_eq!(stats.categories, 2);
        assert_eq!(stats.downloads, 7);
        assert_eq!(stats.copies, 3);
        assert_eq!(stats.views, 13);
    }

    #[test]
    fn test_dashboard_empty() {
        assert_eq!(DashboardStats::from_pool(&[]), DashboardStats::default());
    }

    #[test]
    fn test_top_by_is_stable() {
        let pool = vec![item("a", "X", 1, 0), item("b", "X", 4, 0), item("c", "X", 1, 0)];
        let top: Vec<_> = top_by(&pool, Metric::Downloads, 3)
            .iter()
            .map(|i| i.id.as_str())
            .collect();
        assert_eq!(top, vec!["b", "a", "c"]);
        assert_eq!(top_by(&pool, Metric::Views, 1).len(), 1);
    }

    #[test]
    fn test_recent_and_featured() {
        let now = Utc::now();
        let pool = vec![
            item("old", "X", 0, 0).with_created_at(now - Duration::days(2)).featured(),
            item("new", "X", 0, 0).with_created_at(now).featured(),
            item("mid", "X", 0, 0).with_created_at(now - Duration::days(1)),
        ];

        let recent: Vec<_> = recent(&pool, 2).iter().map(|i| i.id.as_str()).collect();
        assert_eq!(recent, vec!["new", "mid"]);

        let featured: Vec<_> = featured(&pool).iter().map(|i| i.id.as_str()).collect();
        assert_eq!(featured, vec!["new", "old"]);
    }

    #[test]
    fn test_metric_from_str() {
        assert_eq!("Views".parse::<Metric>().unwrap(), Metric::Views);
        assert_eq!("copy".parse::<Metric>().unwrap(), Metric::Copies);
        assert!("likes".parse::<Metric>().is_err());
    }
}
