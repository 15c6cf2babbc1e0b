//! HTTP route handlers for the StockSage backend.

use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use gemini_client::GeminiClient;
use newsapi_client::NewsClient;
use prediction_core::{Prediction, PredictionError};
use prediction_engine::PredictionEngine;

use crate::AppState;

/// Required query parameter for the data endpoints.
#[derive(Deserialize)]
pub struct TickerQuery {
    pub ticker: String,
}

/// Failure payload. Every pipeline error is served as this object with
/// HTTP 200, which is what the frontend checks for.
#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/price-data", get(get_price_data))
        .route("/predict", get(predict))
}

const LANDING_PAGE: &str = r#"
    <html>
    <head>
        <title>StockSage</title>
        <style>
            body {
                background: linear-gradient(135deg, #232526, #414345);
                height: 100vh;
                margin: 0;
                display: flex;
                align-items: center;
                justify-content: center;
                font-family: 'Segoe UI', Arial, sans-serif;
            }
            .center {
                color: #fff;
                background: rgba(0,0,0,0.5);
                padding: 40px 60px;
                border-radius: 20px;
                box-shadow: 0 8px 32px 0 rgba(31, 38, 135, 0.37);
                font-size: 2rem;
                text-align: center;
                letter-spacing: 2px;
                animation: fadeIn 1.2s;
            }
            @keyframes fadeIn {
                from { opacity: 0; transform: scale(0.95); }
                to { opacity: 1; transform: scale(1); }
            }
        </style>
    </head>
    <body>
        <div class="center">
            🚀 StockSage backend server is <b>up and running</b>! 🚀
        </div>
    </body>
    </html>
    "#;

pub(crate) async fn root() -> Html<&'static str> {
    Html(LANDING_PAGE)
}

pub(crate) async fn get_price_data(
    State(state): State<AppState>,
    Query(query): Query<TickerQuery>,
) -> Response {
    match state.yahoo.daily_history(&query.ticker).await {
        Ok(bars) => Json(bars).into_response(),
        Err(e) => {
            tracing::warn!("price data fetch for {} failed: {}", query.ticker, e);
            Json(ErrorBody {
                error: e.to_string(),
            })
            .into_response()
        }
    }
}

pub(crate) async fn predict(
    State(state): State<AppState>,
    Query(query): Query<TickerQuery>,
) -> Response {
    match run_pipeline(&state, &query.ticker).await {
        Ok(prediction) => Json(prediction).into_response(),
        Err(e) => Json(ErrorBody {
            error: e.to_string(),
        })
        .into_response(),
    }
}

/// Gate on the configured keys, then hand the ticker to the engine. The
/// Gemini key is checked before the news key, and no upstream is contacted
/// when either is missing.
async fn run_pipeline(state: &AppState, ticker: &str) -> Result<Prediction, PredictionError> {
    let config = &state.config;
    let Some(gemini_key) = config.gemini_api_key.clone() else {
        return Err(PredictionError::MissingKey("GEMINI_API_KEY".to_string()));
    };
    let Some(news_key) = config.news_api_key.clone() else {
        return Err(PredictionError::MissingKey("NEWS_API_KEY".to_string()));
    };

    let mut news = NewsClient::new(news_key);
    if let Some(base) = &config.newsapi_base_url {
        news = news.with_base_url(base.clone());
    }
    let mut gemini = GeminiClient::new(gemini_key);
    if let Some(base) = &config.gemini_base_url {
        gemini = gemini.with_base_url(base.clone());
    }

    PredictionEngine::new(news, state.yahoo.clone(), gemini)
        .predict(ticker)
        .await
}
