//! HTTP adapter for the external exchange-rate provider.
//!
//! The provider exposes `GET /{base}` returning a JSON body with a `rates`
//! mapping from target currency code to decimal multiplier.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::debug;

use currency_locale::CurrencyCode;
use pricing_types::{FetchError, RateFetcher};

/// Deadline for a single provider call. The rate fetch sits on the pricing
/// path, so it must fail fast rather than hang on a slow upstream.
const FETCH_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug, Deserialize)]
struct ProviderResponse {
    #[serde(default)]
    rates: HashMap<String, f64>,
    error: Option<String>,
}

/// Rate fetcher backed by an HTTP exchange-rate API.
#[derive(Clone)]
pub struct HttpRateFetcher {
    http: Client,
    base_url: Url,
    provider_name: String,
}

impl HttpRateFetcher {
    /// Creates a fetcher for the given provider base URL.
    pub fn new(base_url: &str, provider_name: impl Into<String>) -> anyhow::Result<Self> {
        let base_url = Url::parse(base_url)?;
        Ok(Self {
            http: Client::new(),
            base_url,
            provider_name: provider_name.into(),
        })
    }

    fn rate_url(&self, base: CurrencyCode) -> Result<Url, FetchError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::Unavailable("Invalid provider base URL".into()))?
            .push(base.code());
        Ok(url)
    }
}

#[async_trait]
impl RateFetcher for HttpRateFetcher {
    async fn fetch_rate(
        &self,
        from: CurrencyCode,
        to: CurrencyCode,
    ) -> Result<f64, FetchError> {
        let url = self.rate_url(from)?;

        let resp = self
            .http
            .get(url)
            .timeout(FETCH_TIMEOUT)
            .send()
            .await
            .map_err(|e| FetchError::Unavailable(format!("Rate API unreachable: {}", e)))?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp
                .json::<ProviderResponse>()
                .await
                .ok()
                .and_then(|body| body.error)
                .unwrap_or_else(|| format!("HTTP {}", status));
            return Err(FetchError::Unavailable(message));
        }

        let body = resp
            .json::<ProviderResponse>()
            .await
            .map_err(|e| FetchError::MalformedResponse(e.to_string()))?;

        // Sanity bound: a supported-currency pair should never be anywhere
        // near four orders of magnitude apart.
        match body.rates.get(to.code()).copied() {
            Some(rate) if rate > 0.0 && rate < 10_000.0 => {
                debug!(%from, %to, rate, "Fetched rate from provider");
                Ok(rate)
            }
            Some(rate) => Err(FetchError::MalformedResponse(format!(
                "Implausible rate {} for {} -> {}",
                rate, from, to
            ))),
            None => Err(FetchError::RateNotAvailable(from, to)),
        }
    }

    fn provider_name(&self) -> &str {
        &self.provider_name
    }
}
