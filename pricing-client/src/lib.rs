//! # Pricing Client SDK
//!
//! A typed Rust client for the Pricing API.

use currency_locale::CurrencyCode;
use pricing_types::{
    ConvertResponse, CreateLotRequest, LotId, LotPricing, LotSearchResult, ParkingLot,
    RatesResponse, SetLotPricingRequest,
};
use reqwest::Client;
use serde::de::DeserializeOwned;

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Pricing API client.
pub struct PricingClient {
    base_url: String,
    http: Client,
}

impl PricingClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Checks if the API is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(resp.status().is_success())
    }

    /// Converts an amount between currencies.
    pub async fn convert(
        &self,
        amount: f64,
        from: CurrencyCode,
        to: CurrencyCode,
    ) -> Result<ConvertResponse, ClientError> {
        self.get(&format!(
            "/api/currency/convert?from={}&to={}&amount={}",
            from, to, amount
        ))
        .await
    }

    /// Lists the active stored rates for a base currency.
    pub async fn rates(&self, base: CurrencyCode) -> Result<RatesResponse, ClientError> {
        self.get(&format!("/api/currency/rates/{}", base)).await
    }

    /// Registers a new parking lot.
    pub async fn create_lot(
        &self,
        name: &str,
        airport_code: &str,
        distance_miles: f64,
    ) -> Result<ParkingLot, ClientError> {
        let req = CreateLotRequest {
            name: name.to_string(),
            airport_code: airport_code.to_string(),
            distance_miles,
        };
        self.post("/api/parking/lots", &req).await
    }

    /// Sets display pricing for one (lot, currency, region) combination.
    pub async fn set_lot_pricing(
        &self,
        lot_id: LotId,
        currency: CurrencyCode,
        region: &str,
        daily_price: f64,
        weekly_price: f64,
    ) -> Result<LotPricing, ClientError> {
        let req = SetLotPricingRequest {
            currency,
            region: region.to_string(),
            daily_price,
            weekly_price,
        };
        self.put(&format!("/api/parking/lots/{}/pricing", lot_id), &req)
            .await
    }

    /// Searches lots serving an airport, localized by the optional
    /// region/currency/locale hints.
    pub async fn search(
        &self,
        airport: &str,
        region: Option<&str>,
        currency: Option<CurrencyCode>,
        locale: Option<&str>,
    ) -> Result<Vec<LotSearchResult>, ClientError> {
        let mut path = format!("/api/parking/search?airport={}", airport);
        if let Some(region) = region {
            path.push_str(&format!("&region={}", region));
        }
        if let Some(currency) = currency {
            path.push_str(&format!("&currency={}", currency));
        }
        if let Some(locale) = locale {
            path.push_str(&format!("&locale={}", locale));
        }
        self.get(&path).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let resp = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let resp = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn put<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let resp = self
            .http
            .put(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
                .unwrap_or(body);
            Err(ClientError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = PricingClient::new("http://localhost:3000");
        assert_eq!(client.base_url, "http://localhost:3000");
    }

    #[test]
    fn test_client_with_trailing_slash() {
        let client = PricingClient::new("http://localhost:3000/");
        assert_eq!(client.base_url, "http://localhost:3000");
    }
}
