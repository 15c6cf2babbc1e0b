#[cfg(test)]
mod tests {
    use super::super::routes::{get_price_data, predict, root, TickerQuery};
    use super::super::{AppState, ServerConfig};
    use axum::extract::{Query, State};
    use axum::http::StatusCode;
    use axum::response::Response;
    use httpmock::Method::{GET, POST};
    use httpmock::MockServer;
    use serde_json::{json, Value};

    fn ticker(symbol: &str) -> Query<TickerQuery> {
        Query(TickerQuery {
            ticker: symbol.to_string(),
        })
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn flat_chart(days: usize, price: f64) -> Value {
        let timestamps: Vec<i64> = (0..days).map(|i| 1_740_096_000 + i as i64 * 86_400).collect();
        let column: Vec<f64> = vec![price; days];
        let volumes: Vec<u64> = vec![1_000_000; days];
        json!({
            "chart": {
                "result": [{
                    "timestamp": timestamps,
                    "indicators": {
                        "quote": [{
                            "open": column.clone(),
                            "high": column.clone(),
                            "low": column.clone(),
                            "close": column,
                            "volume": volumes,
                        }]
                    }
                }],
                "error": null
            }
        })
    }

    #[tokio::test]
    async fn root_serves_landing_page() {
        let page = root().await;
        assert!(page.0.contains("<title>StockSage</title>"));
        assert!(page.0.contains("StockSage backend server is <b>up and running</b>!"));
    }

    #[tokio::test]
    async fn predict_without_gemini_key_reports_it_first() {
        let state = AppState::new(ServerConfig::default());

        let response = predict(State(state), ticker("AAPL")).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["error"], "GEMINI_API_KEY not set in environment.");
    }

    #[tokio::test]
    async fn predict_without_news_key_reports_it_second() {
        let state = AppState::new(ServerConfig {
            gemini_api_key: Some("gemini-key".to_string()),
            ..ServerConfig::default()
        });

        let response = predict(State(state), ticker("AAPL")).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["error"], "NEWS_API_KEY not set in environment.");
    }

    #[tokio::test]
    async fn price_data_serializes_record_rows() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/v8/finance/chart/AAPL")
                .query_param("range", "6mo")
                .query_param("interval", "1d");
            then.status(200)
                .header("content-type", "application/json")
                .body(flat_chart(2, 100.5).to_string());
        });
        let state = AppState::new(ServerConfig {
            yahoo_base_url: Some(server.base_url()),
            ..ServerConfig::default()
        });

        let response = get_price_data(State(state), ticker("AAPL")).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        let rows = body.as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["Date"], "2025-02-21T00:00:00Z");
        assert_eq!(rows[0]["Open"], 100.5);
        assert_eq!(rows[0]["Close"], 100.5);
        assert_eq!(rows[0]["Volume"], 1_000_000);
        mock.assert();
    }

    #[tokio::test]
    async fn price_data_failure_is_an_error_object() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/v8/finance/chart/AAPL");
            then.status(500).body("upstream down");
        });
        let state = AppState::new(ServerConfig {
            yahoo_base_url: Some(server.base_url()),
            ..ServerConfig::default()
        });

        let response = get_price_data(State(state), ticker("AAPL")).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        let message = body["error"].as_str().unwrap();
        assert!(message.starts_with("HTTP 500"));
    }

    #[tokio::test]
    async fn predict_with_stubbed_upstreams_returns_prediction() {
        let news_server = MockServer::start();
        news_server.mock(|when, then| {
            when.method(GET).path("/v2/everything");
            then.status(200)
                .header("content-type", "application/json")
                .body(
                    json!({
                        "status": "ok",
                        "articles": [{
                            "title": "Apple beats estimates",
                            "description": "Strong quarter.",
                            "url": "https://example.com/a"
                        }]
                    })
                    .to_string(),
                );
        });

        let chart_server = MockServer::start();
        chart_server.mock(|when, then| {
            when.method(GET).path("/v8/finance/chart/AAPL");
            then.status(200)
                .header("content-type", "application/json")
                .body(flat_chart(25, 150.0).to_string());
        });

        let verdict = json!({
            "news_scores": [{
                "title": "Apple beats estimates",
                "summary": "Looks strong",
                "score": 6,
                "url": "https://example.com/a"
            }],
            "sentiment": "positive"
        });
        let gemini_server = MockServer::start();
        gemini_server.mock(|when, then| {
            when.method(POST).path("/v1beta/models/gemini-2.5-flash:generateContent");
            then.status(200)
                .header("content-type", "application/json")
                .body(
                    json!({
                        "candidates": [{
                            "content": { "parts": [{ "text": verdict.to_string() }] }
                        }]
                    })
                    .to_string(),
                );
        });

        let state = AppState::new(ServerConfig {
            gemini_api_key: Some("gemini-key".to_string()),
            news_api_key: Some("news-key".to_string()),
            yahoo_base_url: Some(chart_server.base_url()),
            newsapi_base_url: Some(news_server.base_url()),
            gemini_base_url: Some(gemini_server.base_url()),
            ..ServerConfig::default()
        });

        let response = predict(State(state), ticker("AAPL")).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["ticker"], "AAPL");
        assert_eq!(body["sentiment"], "positive");
        assert_eq!(body["short_ma"], 150.0);
        assert_eq!(body["long_ma"], 150.0);
        assert_eq!(body["last_price"], 150.0);
        assert_eq!(body["news_scores"][0]["score"], 6.0);
        assert!(body["price_text"]
            .as_str()
            .unwrap()
            .starts_with("Last 10 closing prices:"));
    }
}
