use thiserror::Error;

/// Pipeline failure taxonomy. The `Display` strings are the exact bodies
/// served to clients in the `{"error": ...}` payload, so changing them is a
/// breaking wire change.
#[derive(Error, Debug)]
pub enum PredictionError {
    #[error("{0} not set in environment.")]
    MissingKey(String),

    #[error("Failed to fetch news.")]
    NewsRejected,

    #[error("Exception fetching news.")]
    NewsUnreachable,

    #[error("No price data available for prediction.")]
    NoPriceData,

    #[error("Exception fetching price data.")]
    PriceUnreachable,

    #[error("Exception during LLM processing: {0}")]
    LlmFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_match_wire_contract() {
        assert_eq!(
            PredictionError::MissingKey("GEMINI_API_KEY".to_string()).to_string(),
            "GEMINI_API_KEY not set in environment."
        );
        assert_eq!(
            PredictionError::NewsRejected.to_string(),
            "Failed to fetch news."
        );
        assert_eq!(
            PredictionError::NewsUnreachable.to_string(),
            "Exception fetching news."
        );
        assert_eq!(
            PredictionError::NoPriceData.to_string(),
            "No price data available for prediction."
        );
        assert_eq!(
            PredictionError::PriceUnreachable.to_string(),
            "Exception fetching price data."
        );
    }

    #[test]
    fn llm_failure_has_no_trailing_period() {
        let msg = PredictionError::LlmFailed("connection reset".to_string()).to_string();
        assert_eq!(msg, "Exception during LLM processing: connection reset");
    }
}
