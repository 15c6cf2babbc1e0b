//! Prompt rendering for the scoring call.
//!
//! The model is asked for both per-article impact scores and the aggregate
//! sentiment in a single request; the wording here is load-bearing because
//! the response schema names fields the instruction text introduces.

use prediction_core::NewsItem;

/// Render the scoring prompt: instruction block, one numbered block per
/// article, then the recent-closes line. Deterministic for a given input.
pub fn build_prompt(ticker: &str, items: &[NewsItem], price_text: &str) -> String {
    let mut prompt = format!(
        "Given the following news headlines and summaries for the stock ticker '{ticker}', \
         rate the impact of each article on the stock price on a scale from -10 (very negative) \
         to +10 (very positive) as a list of NewsScore objects. Then, based on the news and the \
         following price data, provide the overall sentiment (positive, negative, or neutral) \
         for the stock as a string field named 'sentiment'.\n\n"
    );

    for (idx, item) in items.iter().enumerate() {
        let summary = item.summary.as_deref().unwrap_or("");
        prompt.push_str(&format!(
            "Article {}:\nTitle: {}\nSummary: {}\nURL: {}\n",
            idx + 1,
            item.title,
            summary,
            item.url
        ));
    }

    prompt.push_str(&format!("\n{price_text}"));
    prompt
}
