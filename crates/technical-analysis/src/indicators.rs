/// Trailing simple moving average. One value per position where the window
/// is fully populated; shorter series produce an empty vec.
pub fn rolling_mean(data: &[f64], window: usize) -> Vec<f64> {
    if window == 0 || data.len() < window {
        return vec![];
    }

    let mut result = Vec::with_capacity(data.len() - window + 1);
    let mut sum: f64 = data[..window].iter().sum();
    result.push(sum / window as f64);

    for i in window..data.len() {
        sum += data[i] - data[i - window];
        result.push(sum / window as f64);
    }
    result
}

/// Mean of the trailing `window` values, `None` when the series is shorter
/// than the window.
pub fn latest_rolling_mean(data: &[f64], window: usize) -> Option<f64> {
    if window == 0 || data.len() < window {
        return None;
    }

    let sum: f64 = data[data.len() - window..].iter().sum();
    Some(sum / window as f64)
}

/// Most recent value of the series.
pub fn last_close(data: &[f64]) -> Option<f64> {
    data.last().copied()
}

/// Human-readable line listing the trailing `n` values to two decimals,
/// oldest first. Fed verbatim into the model prompt and echoed in the
/// prediction payload.
pub fn recent_closes_text(data: &[f64], n: usize) -> String {
    let start = data.len().saturating_sub(n);
    let joined = data[start..]
        .iter()
        .map(|v| format!("{v:.2}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!("Last {n} closing prices: {joined}")
}
