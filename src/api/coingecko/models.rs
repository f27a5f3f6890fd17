use chrono::DateTime;
use serde::Deserialize;
use thiserror::Error;

use crate::models::PricePoint;

/// Response from GET /coins/{id}/market_chart
///
/// Prices arrive as `[timestamp_ms, price]` pairs with timestamps in
/// milliseconds since the epoch, UTC. A missing `prices` field is treated
/// the same as an empty one.
#[derive(Debug, Clone, Deserialize)]
pub struct MarketChartResponse {
    #[serde(default)]
    pub prices: Vec<(f64, f64)>,
}

/// Fetch errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// Non-success HTTP status
    #[error("HTTP error ({0}): {1}")]
    HttpStatus(u16, String),
    /// Network/request error
    #[error("Request failed: {0}")]
    Request(String),
    /// Response body could not be parsed
    #[error("Failed to parse response: {0}")]
    Deserialization(String),
    /// Provider returned no price data
    #[error("No price data returned")]
    EmptyPayload,
    /// Provider timestamp outside the representable range
    #[error("Invalid timestamp in response: {0}")]
    InvalidTimestamp(f64),
}

impl MarketChartResponse {
    /// Convert the wire pairs into a date-ascending price series.
    ///
    /// Provider timestamps are converted to calendar dates (UTC). The
    /// provider is expected to return the series oldest-first, but the
    /// data is uncontrolled, so the result is sorted to enforce it.
    pub fn into_price_series(self) -> Result<Vec<PricePoint>, ApiError> {
        if self.prices.is_empty() {
            return Err(ApiError::EmptyPayload);
        }

        let mut series = Vec::with_capacity(self.prices.len());
        for (timestamp_ms, price) in self.prices {
            let date = DateTime::from_timestamp_millis(timestamp_ms as i64)
                .ok_or(ApiError::InvalidTimestamp(timestamp_ms))?
                .date_naive();
            series.push(PricePoint { date, price });
        }

        series.sort_by_key(|p| p.date);
        Ok(series)
    }
}
