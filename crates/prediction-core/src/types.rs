use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One daily OHLCV row. Serialized field names follow the record shape the
/// frontend consumes (`Date`, `Open`, ..., one object per trading day).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Bar {
    pub date: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: Option<u64>,
}

/// A news article retained for scoring (articles without a title are dropped
/// upstream and never reach this type).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub summary: Option<String>,
    pub url: String,
}

/// Per-article impact score produced by the model, nominally in [-10, 10].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewsScore {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub url: String,
}

/// Aggregate sentiment label. Anything the model emits outside the three
/// known labels collapses to `Unknown`, which is also the default when the
/// field is missing entirely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
    #[default]
    Unknown,
}

impl From<String> for Sentiment {
    fn from(s: String) -> Self {
        match s.as_str() {
            "positive" => Sentiment::Positive,
            "negative" => Sentiment::Negative,
            "neutral" => Sentiment::Neutral,
            _ => Sentiment::Unknown,
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sentiment::Positive => write!(f, "positive"),
            Sentiment::Negative => write!(f, "negative"),
            Sentiment::Neutral => write!(f, "neutral"),
            Sentiment::Unknown => write!(f, "unknown"),
        }
    }
}

/// The `/predict` success payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    pub ticker: String,
    pub news_scores: Vec<NewsScore>,
    pub sentiment: Sentiment,
    pub price_text: String,
    pub short_ma: Option<f64>,
    pub long_ma: Option<f64>,
    pub last_price: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn bar_serializes_with_record_field_names() {
        let bar = Bar {
            date: Utc.with_ymd_and_hms(2025, 2, 21, 0, 0, 0).unwrap(),
            open: 100.0,
            high: 102.0,
            low: 99.0,
            close: 101.5,
            volume: Some(1_200_000),
        };

        let value = serde_json::to_value(&bar).unwrap();
        assert_eq!(value["Date"], "2025-02-21T00:00:00Z");
        assert_eq!(value["Open"], 100.0);
        assert_eq!(value["Close"], 101.5);
        assert_eq!(value["Volume"], 1_200_000);
    }

    #[test]
    fn sentiment_round_trips_lowercase() {
        let s: Sentiment = serde_json::from_str("\"negative\"").unwrap();
        assert_eq!(s, Sentiment::Negative);
        assert_eq!(serde_json::to_string(&s).unwrap(), "\"negative\"");
    }

    #[test]
    fn unrecognized_sentiment_collapses_to_unknown() {
        let s: Sentiment = serde_json::from_str("\"bullish\"").unwrap();
        assert_eq!(s, Sentiment::Unknown);
        assert_eq!(s.to_string(), "unknown");
    }

    #[test]
    fn news_score_fields_default_when_missing() {
        let score: NewsScore = serde_json::from_str("{\"title\":\"Earnings beat\"}").unwrap();
        assert_eq!(score.title, "Earnings beat");
        assert_eq!(score.summary, "");
        assert_eq!(score.score, 0.0);
        assert_eq!(score.url, "");
    }
}
