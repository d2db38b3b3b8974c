//! REST adapter for the hosted gallery table.
//!
//! Talks to a PostgREST-style endpoint (`/rest/v1/<table>`) using the
//! project's public API key. A session token, when configured, is sent as
//! the bearer token and marks the client as authenticated.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::{Backend, BackendError, BackendResult};
use crate::domain::{ContentId, ContentItem};

/// Default table holding gallery records
pub const DEFAULT_TABLE: &str = "images";

/// Connection settings for the hosted backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestConfig {
    /// Project base URL, e.g. `https://xyz.example.co`
    pub url: String,

    /// Public (anon) API key
    pub api_key: String,

    /// Signed-in user's access token
    #[serde(default)]
    pub session_token: Option<String>,

    #[serde(default = "default_table")]
    pub table: String,
}

fn default_table() -> String {
    DEFAULT_TABLE.to_string()
}

/// Hosted backend client
pub struct RestBackend {
    config: RestConfig,
    client: reqwest::Client,
}

impl RestBackend {
    /// Create a new client
    pub fn new(config: RestConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Build the table endpoint URL
    fn table_url(&self) -> String {
        format!(
            "{}/rest/v1/{}",
            self.config.url.trim_end_matches('/'),
            self.config.table
        )
    }

    fn bearer(&self) -> &str {
        self.config
            .session_token
            .as_deref()
            .unwrap_or(&self.config.api_key)
    }

    async fn select(&self, query: &[(&str, String)]) -> BackendResult<Vec<ContentItem>> {
        let response = self
            .client
            .get(self.table_url())
            .query(query)
            .header("apikey", &self.config.api_key)
            .bearer_auth(self.bearer())
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(BackendError::Unauthorized(response.text().await.unwrap_or_default()));
        }
        if !status.is_success() {
            return Err(BackendError::Status {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl Backend for RestBackend {
    fn name(&self) -> &str {
        "rest"
    }

    #[instrument(skip(self), fields(table = %self.config.table))]
    async fn fetch_all_items(&self) -> BackendResult<Vec<ContentItem>> {
        let items = self
            .select(&[
                ("select", "*".to_string()),
                ("order", "created_at.desc".to_string()),
            ])
            .await?;
        debug!(count = items.len(), "Fetched gallery items");
        Ok(items)
    }

    #[instrument(skip(self), fields(table = %self.config.table))]
    async fn fetch_item_by_id(&self, id: &ContentId) -> BackendResult<ContentItem> {
        self.select(&[
            ("select", "*".to_string()),
            ("id", format!("eq.{}", id)),
            ("limit", "1".to_string()),
        ])
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| BackendError::NotFound(id.clone()))
    }

    async fn is_authenticated(&self) -> bool {
        self.config
            .session_token
            .as_deref()
            .is_some_and(|t| !t.is_empty())
    }
}
