use std::env;

use anyhow::{Context, Result};

/// Process configuration loaded once at startup.
///
/// The API keys are optional on purpose: the server must come up without
/// them, and their absence is reported per request on `/predict`. An empty
/// value counts as unset.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub gemini_api_key: Option<String>,
    pub news_api_key: Option<String>,
    pub yahoo_base_url: Option<String>,
    pub newsapi_base_url: Option<String>,
    pub gemini_base_url: Option<String>,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse()
            .context("PORT must be a valid port number")?;

        Ok(Self {
            port,
            gemini_api_key: env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty()),
            news_api_key: env::var("NEWS_API_KEY").ok().filter(|k| !k.is_empty()),
            yahoo_base_url: env::var("YAHOO_BASE_URL").ok(),
            newsapi_base_url: env::var("NEWSAPI_BASE_URL").ok(),
            gemini_base_url: env::var("GEMINI_BASE_URL").ok(),
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            gemini_api_key: None,
            news_api_key: None,
            yahoo_base_url: None,
            newsapi_base_url: None,
            gemini_base_url: None,
        }
    }
}
