use prediction_core::NewsItem;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

const BASE_URL: &str = "https://newsapi.org";

#[derive(Error, Debug)]
pub enum NewsError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
}

/// Client for the NewsAPI.org `everything` endpoint.
#[derive(Clone)]
pub struct NewsClient {
    api_key: String,
    client: Client,
    base_url: String,
}

impl NewsClient {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            client: Client::new(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Point the client at a different host (used by tests and local stubs).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Most recent English-language articles matching the query, newest
    /// first. Articles with a missing or empty title are dropped silently.
    pub async fn everything(&self, query: &str, page_size: u32) -> Result<Vec<NewsItem>, NewsError> {
        let url = format!("{}/v2/everything", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", query.to_string()),
                ("sortBy", "publishedAt".to_string()),
                ("language", "en".to_string()),
                ("apiKey", self.api_key.clone()),
                ("pageSize", page_size.to_string()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(NewsError::Status {
                status: response.status().as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        let body: EverythingResponse = response.json().await?;

        let items: Vec<NewsItem> = body
            .articles
            .into_iter()
            .filter_map(|a| {
                let title = a.title?;
                if title.is_empty() {
                    return None;
                }
                Some(NewsItem {
                    title,
                    summary: a.description,
                    url: a.url.unwrap_or_default(),
                })
            })
            .collect();

        tracing::debug!("NewsAPI returned {} usable articles for '{}'", items.len(), query);
        Ok(items)
    }
}

// Wire structures
#[derive(Deserialize)]
struct EverythingResponse {
    #[serde(default)]
    articles: Vec<WireArticle>,
}

#[derive(Deserialize)]
struct WireArticle {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    url: Option<String>,
}
