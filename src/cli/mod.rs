//! Command-line interface for progall.
//!
//! Provides commands for browsing the gallery pool, finding related
//! items, listing category facets, and viewing dashboard statistics.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};

use crate::adapters::{Backend, LocalBackend, RestBackend};
use crate::analytics::{self, DashboardStats, Metric};
use crate::config;
use crate::domain::{ContentId, ContentItem};
use crate::gallery::{aggregate_categories, ranker, CategorySelection, FacetCursor, GalleryFilter};
use crate::library::Catalog;

/// progall - Prompt gallery browser
#[derive(Parser, Debug)]
#[command(name = "progall")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Read from the hosted backend instead of the local catalog
    #[arg(long, global = true, env = "PROGALL_REMOTE")]
    pub remote: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List gallery items, newest first
    List {
        /// Only items in this category ("All" for every category)
        #[arg(short, long)]
        category: Option<String>,

        /// Maximum number of items to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Search prompts and tags
    Search {
        /// Search query
        query: String,

        /// Restrict to a category
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Show details of an item
    Show {
        /// Content ID (a prefix works for the local catalog)
        content_id: String,
    },

    /// Show items related to an item
    Related {
        /// Content ID of the focal item (or a prefix, locally)
        content_id: String,

        /// Number of related items (defaults to gallery.related_limit)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// List category facets by frequency
    Categories {
        /// Number of "show more" activations to apply
        #[arg(short, long, default_value = "0")]
        expand: usize,
    },

    /// Show dashboard statistics (requires a session on the hosted backend)
    Stats {
        /// Metric used for the top list
        #[arg(short, long, default_value = "downloads")]
        metric: Metric,

        /// Number of items in the top list
        #[arg(short, long, default_value = "5")]
        top: usize,
    },

    /// Import items from a JSON array into the local catalog
    Import {
        /// JSON file containing an array of items
        file: PathBuf,
    },

    /// Show resolved configuration (debug)
    Config,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        let remote = self.remote;

        match self.command {
            Commands::List { category, limit } => {
                list_items(open_backend(remote)?.as_ref(), category, limit).await
            }
            Commands::Search { query, category } => {
                search_items(open_backend(remote)?.as_ref(), &query, category).await
            }
            Commands::Show { content_id } => {
                show_item(open_backend(remote)?.as_ref(), &content_id).await
            }
            Commands::Related { content_id, limit } => {
                show_related(open_backend(remote)?.as_ref(), &content_id, limit).await
            }
            Commands::Categories { expand } => {
                show_categories(open_backend(remote)?.as_ref(), expand).await
            }
            Commands::Stats { metric, top } => {
                show_stats(open_backend(remote)?.as_ref(), metric, top).await
            }
            Commands::Import { file } => import_items(&file).await,
            Commands::Config => show_config(),
        }
    }
}

/// Pick the backend for this invocation
fn open_backend(remote: bool) -> Result<Box<dyn Backend>> {
    let backend: Box<dyn Backend> = if remote {
        let rest = config::config()?.backend.clone().context(
            "No hosted backend configured. Set PROGALL_BACKEND_URL and PROGALL_API_KEY",
        )?;
        Box::new(RestBackend::new(rest))
    } else {
        Box::new(LocalBackend::from_config()?)
    };

    debug!(backend = backend.name(), "Using backend");
    Ok(backend)
}

/// Truncate to `max` characters, adding an ellipsis
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let head: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

fn print_table(items: &[&ContentItem]) {
    println!("{:<38} {:<16} {:<50}", "ID", "CATEGORY", "PROMPT");
    println!("{}", "-".repeat(106));

    for item in items {
        println!(
            "{:<38} {:<16} {:<50}",
            item.id.as_str(),
            truncate(&item.category, 16),
            truncate(&item.prompt, 50)
        );
    }
}

/// List items, optionally restricted to a category
async fn list_items(backend: &dyn Backend, category: Option<String>, limit: usize) -> Result<()> {
    let pool = backend.fetch_all_items().await?;

    if pool.is_empty() {
        println!("Gallery is empty. Use 'progall import <file>' to add items.");
        return Ok(());
    }

    let filter = GalleryFilter::new(CategorySelection::from(category), "");
    let items = filter.apply(&pool);
    let shown: Vec<&ContentItem> = items.iter().take(limit).copied().collect();

    print_table(&shown);
    println!("\nShowing {} of {} items", shown.len(), items.len());

    Ok(())
}

/// Search prompts and tags
async fn search_items(backend: &dyn Backend, query: &str, category: Option<String>) -> Result<()> {
    let pool = backend.fetch_all_items().await?;

    let filter = GalleryFilter::new(CategorySelection::from(category), query);
    let results = filter.apply(&pool);

    if results.is_empty() {
        println!("No results found for: {}", query);
        return Ok(());
    }

    println!("Found {} result(s) for \"{}\":\n", results.len(), query);
    print_table(&results);

    Ok(())
}

/// Show details of one item
async fn show_item(backend: &dyn Backend, content_id: &str) -> Result<()> {
    let item = backend
        .fetch_item_by_id(&ContentId::from(content_id))
        .await?;

    println!("ID:        {}", item.id);
    println!("Category:  {}", item.category);
    println!("Prompt:    {}", item.prompt);
    if !item.tags.is_empty() {
        println!("Tags:      {}", item.tags.join(", "));
    }
    println!("Image:     {}", item.url);
    println!("Thumbnail: {}", item.thumbnail);
    println!("Featured:  {}", if item.is_featured { "yes" } else { "no" });
    println!(
        "Counters:  {} downloads, {} copies, {} views",
        item.counters.downloads, item.counters.copies, item.counters.views
    );
    println!("Created:   {}", item.created_at);

    Ok(())
}

/// Show items related to a focal item
async fn show_related(backend: &dyn Backend, content_id: &str, limit: Option<usize>) -> Result<()> {
    let settings = &config::config()?.gallery;
    let limit = limit.unwrap_or(settings.related_limit);

    let focal = backend
        .fetch_item_by_id(&ContentId::from(content_id))
        .await?;
    let pool = backend.fetch_all_items().await?;
    let candidates = ranker::related_candidates(&pool, &focal, settings.candidate_pool);

    let ranked = ranker::rank_scored(&focal, &candidates, limit);
    info!(focal = %focal.id, candidates = candidates.len(), "Ranked related items");

    if ranked.is_empty() {
        println!("No related items for: {}", focal.id);
        return Ok(());
    }

    println!("Related to: {}\n", truncate(&focal.prompt, 80));
    println!(
        "{:<38} {:>5} {:>4} {:>4} {:>4}  {:<40}",
        "ID", "SCORE", "CAT", "TAG", "WORD", "PROMPT"
    );
    println!("{}", "-".repeat(106));

    for r in &ranked {
        println!(
            "{:<38} {:>5} {:>4} {:>4} {:>4}  {:<40}",
            r.item.id.as_str(),
            r.score.total(),
            r.score.category,
            r.score.tags,
            r.score.words,
            truncate(&r.item.prompt, 40)
        );
    }

    Ok(())
}

/// Show category facets with "show more" pagination
async fn show_categories(backend: &dyn Backend, expand: usize) -> Result<()> {
    let page_size = config::config()?.gallery.facet_page_size;
    let pool = backend.fetch_all_items().await?;
    let buckets = aggregate_categories(&pool);

    let mut cursor = FacetCursor::new(page_size);
    for _ in 0..expand {
        cursor.show_more(buckets.len());
    }

    println!("{:<30} {:>6}", "CATEGORY", "COUNT");
    println!("{}", "-".repeat(37));
    for bucket in cursor.visible(&buckets) {
        println!("{:<30} {:>6}", truncate(&bucket.name, 30), bucket.count);
    }

    if cursor.has_more(buckets.len()) {
        println!(
            "\n{} more categories (use --expand {})",
            buckets.len() - cursor.limit(),
            expand + 1
        );
    }

    Ok(())
}

/// Show dashboard statistics
async fn show_stats(backend: &dyn Backend, metric: Metric, top: usize) -> Result<()> {
    if !backend.is_authenticated().await {
        anyhow::bail!("Dashboard requires a signed-in session. Set PROGALL_SESSION_TOKEN");
    }

    let pool = backend.fetch_all_items().await?;
    let stats = DashboardStats::from_pool(&pool);

    println!("Items:      {}", stats.total_items);
    println!("Featured:   {}", stats.featured_items);
    println!("Categories: {}", stats.categories);
    println!("Downloads:  {}", stats.downloads);
    println!("Copies:     {}", stats.copies);
    println!("Views:      {}", stats.views);

    println!("\nTop {} by {}:", top, metric);
    for item in analytics::top_by(&pool, metric, top) {
        println!(
            "  {:>8}  {:<38} {}",
            metric.of(item),
            item.id.as_str(),
            truncate(&item.prompt, 40)
        );
    }

    println!("\nRecent:");
    for item in analytics::recent(&pool, top) {
        println!(
            "  {}  {:<38} {}",
            item.created_at.format("%Y-%m-%d"),
            item.id.as_str(),
            truncate(&item.prompt, 40)
        );
    }

    let featured = analytics::featured(&pool);
    if !featured.is_empty() {
        println!("\nFeatured:");
        for item in featured {
            println!("  {:<38} {}", item.id.as_str(), truncate(&item.prompt, 40));
        }
    }

    Ok(())
}

/// Import a JSON array of items into the local catalog
async fn import_items(file: &Path) -> Result<()> {
    let json = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("Failed to read input file: {}", file.display()))?;

    let mut catalog = Catalog::load().await?;
    let count = catalog.import_json(&json)?;
    catalog.save().await?;

    info!(count, total = catalog.len(), "Imported items");
    eprintln!("Imported {} item(s); catalog now holds {}", count, catalog.len());

    Ok(())
}

/// Show the resolved configuration (for debugging)
fn show_config() -> Result<()> {
    let cfg = config::config()?;

    println!(
        "Config file: {}",
        cfg.config_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none - using defaults)".to_string())
    );
    println!();
    println!("Paths:");
    println!("  Home:    {}", cfg.home.display());
    println!("  Catalog: {}", config::catalog_path()?.display());
    println!();
    println!("Backend:");
    match &cfg.backend {
        Some(b) => {
            println!("  URL:     {}", b.url);
            println!("  Table:   {}", b.table);
            println!(
                "  Session: {}",
                if b.session_token.is_some() { "present" } else { "none" }
            );
        }
        None => println!("  (not configured - local catalog only)"),
    }
    println!();
    println!("Gallery:");
    println!("  Related limit:   {}", cfg.gallery.related_limit);
    println!("  Candidate pool:  {}", cfg.gallery.candidate_pool);
    println!("  Facet page size: {}", cfg.gallery.facet_page_size);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghijkl", 8), "abcde...");
        // Multi-byte characters are not split
        assert_eq!(truncate("ééééééé", 5), "éé...");
    }

    #[test]
    fn test_parse_related() {
        let cli = Cli::try_parse_from(["progall", "related", "abc", "--limit", "3"]).unwrap();
        assert!(!cli.remote);
        match cli.command {
            Commands::Related { content_id, limit } => {
                assert_eq!(content_id, "abc");
                assert_eq!(limit, Some(3));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_stats_metric() {
        let cli = Cli::try_parse_from(["progall", "--remote", "stats", "-m", "views"]).unwrap();
        assert!(cli.remote);
        assert!(matches!(
            cli.command,
            Commands::Stats {
                metric: Metric::Views,
                top: 5
            }
        ));
    }
}
