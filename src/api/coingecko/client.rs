use reqwest::Client as HttpClient;

use super::models::{ApiError, MarketChartResponse};
use crate::models::PricePoint;

/// CoinGecko API client for fetching market price history
pub struct CoinGeckoClient {
    http_client: HttpClient,
    base_url: String,
}

impl CoinGeckoClient {
    const DEFAULT_BASE_URL: &'static str = "https://api.coingecko.com/api/v3";

    /// Create a new CoinGecko API client
    pub fn new() -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url: Self::DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Create a new client with custom base URL (for testing)
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url,
        }
    }

    /// Extract the human-readable message from an error body.
    ///
    /// CoinGecko error bodies look like `{"error": "..."}` or
    /// `{"status": {"error_message": "..."}}`; anything else is returned
    /// verbatim.
    fn error_message(body: &str) -> String {
        if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
            if let Some(msg) = value.get("error").and_then(|v| v.as_str()) {
                return msg.to_string();
            }
            if let Some(msg) = value
                .pointer("/status/error_message")
                .and_then(|v| v.as_str())
            {
                return msg.to_string();
            }
        }
        body.to_string()
    }

    /// GET /coins/{id}/market_chart
    ///
    /// Fetches `days` of daily prices quoted in `vs_currency`. Issues a
    /// single request with no retry and no timeout; any failure aborts
    /// the run.
    ///
    /// # Returns
    /// * `Ok(Vec<PricePoint>)` - date-ascending daily price series
    /// * `Err(ApiError)` - transport failure, non-success status, bad JSON
    ///   or an empty payload
    pub async fn fetch_market_chart(
        &self,
        coin_id: &str,
        vs_currency: &str,
        days: u32,
    ) -> Result<Vec<PricePoint>, ApiError> {
        let url = format!("{}/coins/{}/market_chart", self.base_url, coin_id);
        let days = days.to_string();

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("vs_currency", vs_currency),
                ("days", days.as_str()),
                ("interval", "daily"),
            ])
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body_text = response.text().await.unwrap_or_default();
            return Err(ApiError::HttpStatus(status, Self::error_message(&body_text)));
        }

        let chart = response
            .json::<MarketChartResponse>()
            .await
            .map_err(|e| ApiError::Deserialization(e.to_string()))?;

        chart.into_price_series()
    }
}

impl Default for CoinGeckoClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_from_error_field() {
        let body = r#"{"error": "coin not found"}"#;
        assert_eq!(CoinGeckoClient::error_message(body), "coin not found");
    }

    #[test]
    fn test_error_message_from_status_object() {
        let body = r#"{"status": {"error_code": 429, "error_message": "You've exceeded the Rate Limit."}}"#;
        assert_eq!(
            CoinGeckoClient::error_message(body),
            "You've exceeded the Rate Limit."
        );
    }

    #[test]
    fn test_error_message_falls_back_to_raw_body() {
        assert_eq!(CoinGeckoClient::error_message("gateway timeout"), "gateway timeout");
    }
}
