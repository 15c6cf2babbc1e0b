use gemini_client::{build_prompt, GeminiClient};
use newsapi_client::{NewsClient, NewsError};
use prediction_core::{Prediction, PredictionError};
use technical_analysis::{last_close, latest_rolling_mean, recent_closes_text};
use yahoo_client::YahooClient;


const NEWS_PAGE_SIZE: u32 = 5;
const SHORT_WINDOW: usize = 5;
const LONG_WINDOW: usize = 20;
const RECENT_CLOSES: usize = 10;

/// Runs the news -> price -> scoring pipeline for one ticker.
///
/// Stages are strictly sequential and the first failure wins: an upstream
/// later in the chain is never contacted once an earlier stage has failed.
pub struct PredictionEngine {
    news: NewsClient,
    yahoo: YahooClient,
    gemini: GeminiClient,
}

impl PredictionEngine {
    pub fn new(news: NewsClient, yahoo: YahooClient, gemini: GeminiClient) -> Self {
        Self {
            news,
            yahoo,
            gemini,
        }
    }

    pub async fn predict(&self, ticker: &str) -> Result<Prediction, PredictionError> {
        tracing::info!("Running prediction pipeline for {}", ticker);

        let items = self
            .news
            .everything(ticker, NEWS_PAGE_SIZE)
            .await
            .map_err(|e| match e {
                NewsError::Status { status, .. } => {
                    tracing::warn!("News request for {} rejected: HTTP {}", ticker, status);
                    PredictionError::NewsRejected
                }
                other => {
                    tracing::warn!("News fetch for {} failed: {}", ticker, other);
                    PredictionError::NewsUnreachable
                }
            })?;

        let bars = self.yahoo.daily_history(ticker).await.map_err(|e| {
            tracing::warn!("Price history for {} failed: {}", ticker, e);
            PredictionError::PriceUnreachable
        })?;

        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        if closes.is_empty() {
            return Err(PredictionError::NoPriceData);
        }

        let price_text = recent_closes_text(&closes, RECENT_CLOSES);
        let short_ma = latest_rolling_mean(&closes, SHORT_WINDOW);
        let long_ma = latest_rolling_mean(&closes, LONG_WINDOW);
        let last_price = last_close(&closes);

        let prompt = build_prompt(ticker, &items, &price_text);
        let verdict = self.gemini.generate_verdict(&prompt).await.map_err(|e| {
            tracing::warn!("Scoring call for {} failed: {}", ticker, e);
            PredictionError::LlmFailed(e.to_string())
        })?;

        tracing::info!(
            "Pipeline for {} done: {} scored articles, sentiment {}",
            ticker,
            verdict.news_scores.len(),
            verdict.sentiment
        );

        Ok(Prediction {
            ticker: ticker.to_string(),
            news_scores: verdict.news_scores,
            sentiment: verdict.sentiment,
            price_text,
            short_ma,
            long_ma,
            last_price,
        })
    }
}
