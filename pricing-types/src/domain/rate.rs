//! Exchange rate domain model.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use currency_locale::CurrencyCode;

use crate::error::DomainError;

/// Unique identifier for a stored exchange-rate row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct RateId(Uuid);

impl RateId {
    /// Creates a new random RateId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a RateId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RateId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for RateId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A cached conversion rate for one ordered currency pair.
///
/// `target_amount = base_amount * rate`. Exactly one row per pair is active
/// at a time; superseded rows are kept as history with `is_active = false`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExchangeRate {
    /// Unique identifier
    pub id: RateId,
    /// Currency the rate converts from
    pub base_currency: CurrencyCode,
    /// Currency the rate converts to
    pub target_currency: CurrencyCode,
    /// Decimal multiplier applied to base amounts
    pub rate: f64,
    /// Name of the source API that produced this rate
    pub provider: String,
    /// When this rate was last refreshed
    pub last_updated: DateTime<Utc>,
    /// Whether this is the current row for the pair
    pub is_active: bool,
}

impl ExchangeRate {
    /// Creates a freshly fetched, active rate.
    ///
    /// # Validation
    /// - Rate must be strictly positive
    pub fn new(
        base_currency: CurrencyCode,
        target_currency: CurrencyCode,
        rate: f64,
        provider: String,
    ) -> Result<Self, DomainError> {
        if !rate.is_finite() || rate <= 0.0 {
            return Err(DomainError::InvalidRate(rate));
        }

        Ok(Self {
            id: RateId::new(),
            base_currency,
            target_currency,
            rate,
            provider,
            last_updated: Utc::now(),
            is_active: true,
        })
    }

    /// Creates a rate with all fields specified (for database reconstruction).
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: RateId,
        base_currency: CurrencyCode,
        target_currency: CurrencyCode,
        rate: f64,
        provider: String,
        last_updated: DateTime<Utc>,
        is_active: bool,
    ) -> Self {
        Self {
            id,
            base_currency,
            target_currency,
            rate,
            provider,
            last_updated,
            is_active,
        }
    }

    /// Age of the rate relative to `now`.
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now - self.last_updated
    }

    /// True when the rate is younger than `ttl` at time `now`.
    pub fn is_fresh(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        self.age(now) < ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_creation() {
        let rate = ExchangeRate::new(
            CurrencyCode::USD,
            CurrencyCode::GBP,
            0.79,
            "open-rates".to_string(),
        )
        .unwrap();
        assert!(rate.is_active);
        assert_eq!(rate.rate, 0.79);
    }

    #[test]
    fn test_non_positive_rate_fails() {
        let result = ExchangeRate::new(
            CurrencyCode::USD,
            CurrencyCode::GBP,
            0.0,
            "open-rates".to_string(),
        );
        assert!(matches!(result, Err(DomainError::InvalidRate(_))));
    }

    #[test]
    fn test_freshness_window() {
        let mut rate = ExchangeRate::new(
            CurrencyCode::USD,
            CurrencyCode::EUR,
            0.92,
            "open-rates".to_string(),
        )
        .unwrap();

        let now = Utc::now();
        assert!(rate.is_fresh(Duration::hours(6), now));

        rate.last_updated = now - Duration::hours(7);
        assert!(!rate.is_fresh(Duration::hours(6), now));
    }
}
