//! StockSage backend server.
//!
//! Serves the landing page plus the `/price-data` and `/predict` endpoints,
//! wiring the Yahoo, NewsAPI and Gemini clients into the prediction engine.

use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use yahoo_client::YahooClient;

pub mod config;
pub mod routes;

#[cfg(test)]
mod routes_tests;

pub use config::ServerConfig;

/// Shared handler state. The Yahoo client is reused across requests; the
/// news and Gemini clients are built per `/predict` call because their keys
/// are gated per request.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub yahoo: YahooClient,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        let mut yahoo = YahooClient::new();
        if let Some(base) = &config.yahoo_base_url {
            yahoo = yahoo.with_base_url(base.clone());
        }
        Self {
            config: Arc::new(config),
            yahoo,
        }
    }
}

/// Build the application router with request tracing and a permissive CORS
/// policy so the frontend can call from any origin.
pub fn router(state: AppState) -> Router {
    routes::routes()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

/// Entry point used by the binary: load .env, init tracing, bind, serve.
pub async fn run_server() -> Result<()> {
    dotenvy::dotenv().ok();

    let json_logging = std::env::var("RUST_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    if json_logging {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .init();
    }

    let config = ServerConfig::from_env()?;
    if config.gemini_api_key.is_none() {
        tracing::warn!("GEMINI_API_KEY is not set; /predict will return an error");
    }
    if config.news_api_key.is_none() {
        tracing::warn!("NEWS_API_KEY is not set; /predict will return an error");
    }

    let addr = format!("0.0.0.0:{}", config.port);
    let app = router(AppState::new(config));

    tracing::info!("StockSage backend listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
