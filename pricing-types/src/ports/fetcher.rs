//! Rate fetcher port.
//!
//! This trait defines the interface to the external exchange-rate provider.
//! Implementations can be HTTP clients, mock providers, etc.

use currency_locale::CurrencyCode;

use crate::error::FetchError;

/// Port trait for exchange-rate providers.
#[async_trait::async_trait]
pub trait RateFetcher: Send + Sync + 'static {
    /// Fetches a fresh rate for one ordered pair.
    ///
    /// A missing target key in the provider response is a [`FetchError`]
    /// just like a network failure or a non-2xx status; callers treat all
    /// variants as the same fallback branch.
    async fn fetch_rate(
        &self,
        from: CurrencyCode,
        to: CurrencyCode,
    ) -> Result<f64, FetchError>;

    /// Name of the provider, recorded on persisted rows.
    fn provider_name(&self) -> &str;
}
