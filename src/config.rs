//! Configuration for progall.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (PROGALL_HOME, PROGALL_BACKEND_URL,
//!    PROGALL_API_KEY, PROGALL_SESSION_TOKEN)
//! 2. Config file (.progall/config.yaml)
//! 3. Defaults (~/.progall)
//!
//! Config file discovery:
//! - Searches current directory and parents for .progall/config.yaml
//! - `paths.home` is relative to the .progall/ directory

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::adapters::rest::{RestConfig, DEFAULT_TABLE};
use crate::gallery::facets::DEFAULT_PAGE_SIZE;
use crate::gallery::ranker::{DEFAULT_CANDIDATE_POOL, DEFAULT_RELATED_LIMIT};

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub backend: Option<BackendConfig>,
    #[serde(default)]
    pub gallery: Option<GalleryConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsConfig {
    /// State directory (relative to .progall/)
    pub home: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    pub url: Option<String>,
    pub api_key: Option<String>,
    pub table: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GalleryConfig {
    pub related_limit: Option<usize>,
    pub candidate_pool: Option<usize>,
    pub facet_page_size: Option<usize>,
}

/// Resolved configuration with absolute paths
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Absolute path to progall home
    pub home: PathBuf,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
    /// Hosted backend connection, if a URL and key are known
    pub backend: Option<RestConfig>,
    /// Gallery view settings
    pub gallery: GallerySettings,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GallerySettings {
    pub related_limit: usize,
    pub candidate_pool: usize,
    pub facet_page_size: usize,
}

impl Default for GallerySettings {
    fn default() -> Self {
        Self {
            related_limit: DEFAULT_RELATED_LIMIT,
            candidate_pool: DEFAULT_CANDIDATE_POOL,
            facet_page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl GallerySettings {
    fn from_file(gallery: Option<&GalleryConfig>) -> Self {
        let defaults = Self::default();
        let Some(g) = gallery else {
            return defaults;
        };

        Self {
            related_limit: g.related_limit.unwrap_or(defaults.related_limit),
            candidate_pool: g.candidate_pool.unwrap_or(defaults.candidate_pool),
            facet_page_size: g.facet_page_size.unwrap_or(defaults.facet_page_size),
        }
    }
}

/// Find config file by searching current directory and parents
fn find_config_file() -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let config_path = current.join(".progall").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to the config file's parent
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
            .canonicalize()
            .unwrap_or_else(|_| base.join(path_str))
    }
}

/// Merge env overrides over the file's backend section
fn resolve_backend(file: Option<&BackendConfig>) -> Option<RestConfig> {
    let url = std::env::var("PROGALL_BACKEND_URL")
        .ok()
        .or_else(|| file.and_then(|b| b.url.clone()))?;
    let api_key = std::env::var("PROGALL_API_KEY")
        .ok()
        .or_else(|| file.and_then(|b| b.api_key.clone()))?;
    let table = file
        .and_then(|b| b.table.clone())
        .unwrap_or_else(|| DEFAULT_TABLE.to_string());

    Some(RestConfig {
        url,
        api_key,
        session_token: std::env::var("PROGALL_SESSION_TOKEN").ok(),
        table,
    })
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    let default_home = dirs::home_dir()
        .context("Failed to determine home directory")?
        .join(".progall");

    let config_file = find_config_file();
    let parsed = config_file
        .as_deref()
        .map(load_config_file)
        .transpose()?;

    let home = if let Ok(env_home) = std::env::var("PROGALL_HOME") {
        PathBuf::from(env_home)
    } else if let (Some(path), Some(home)) = (
        config_file.as_deref(),
        parsed.as_ref().and_then(|c| c.paths.home.as_deref()),
    ) {
        let progall_dir = path.parent().unwrap_or(Path::new("."));
        resolve_path(progall_dir, home)
    } else {
        default_home
    };

    let backend = resolve_backend(parsed.as_ref().and_then(|c| c.backend.as_ref()));
    let gallery = GallerySettings::from_file(parsed.as_ref().and_then(|c| c.gallery.as_ref()));

    Ok(ResolvedConfig {
        home,
        config_file,
        backend,
        gallery,
    })
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| e.to_string()));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}

/// Get the catalog path ($PROGALL_HOME/catalog.json)
pub fn catalog_path() -> Result<PathBuf> {
    Ok(config()?.home.join("catalog.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_config_file_parsing() {
        let temp = TempDir::new().unwrap();
        let progall_dir = temp.path().join(".progall");
        std::fs::create_dir_all(&progall_dir).unwrap();

        let config_path = progall_dir.join("config.yaml");
        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(
            file,
            r#"
version: "1.0"
paths:
  home: ./state
backend:
  url: https://gallery.example.co
  api_key: anon-key
gallery:
  related_limit: 12
"#
        )
        .unwrap();

        let config = load_config_file(&config_path).unwrap();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.paths.home, Some("./state".to_string()));

        let backend = config.backend.as_ref().unwrap();
        assert_eq!(backend.url.as_deref(), Some("https://gallery.example.co"));
        assert!(backend.table.is_none());

        let gallery = GallerySettings::from_file(config.gallery.as_ref());
        assert_eq!(gallery.related_limit, 12);
        assert_eq!(gallery.candidate_pool, 100);
        assert_eq!(gallery.facet_page_size, 10);
    }

    #[test]
    fn test_gallery_defaults() {
        assert_eq!(
            GallerySettings::from_file(None),
            GallerySettings {
                related_limit: 8,
                candidate_pool: 100,
                facet_page_size: 10,
            }
        );
    }

    #[test]
    fn test_invalid_config_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yaml");
        std::fs::write(&path, "paths: [not, a, map]").unwrap();

        assert!(load_config_file(&path).is_err());
    }

    #[test]
    fn test_resolve_relative_path() {
        let base = PathBuf::from("/home/user/project");

        assert_eq!(
            resolve_path(&base, "./subdir"),
            PathBuf::from("/home/user/project/subdir")
        );
        assert_eq!(
            resolve_path(&base, "/absolute/path"),
            PathBuf::from("/absolute/path")
        );
    }
}
