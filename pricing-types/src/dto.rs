//! Data Transfer Objects (DTOs) for requests and responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use currency_locale::CurrencyCode;

use crate::domain::{LotId, LotPricing};

// ─────────────────────────────────────────────────────────────────────────────
// Currency DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Query parameters for the conversion endpoint.
///
/// Currency codes arrive as raw strings so invalid codes map to a 400
/// instead of a deserialization failure deep in the router.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ConvertParams {
    /// Source currency code
    #[schema(example = "USD")]
    pub from: String,
    /// Target currency code
    #[schema(example = "GBP")]
    pub to: String,
    /// Amount in the source currency
    #[schema(example = 10.0)]
    pub amount: f64,
}

/// Response of the conversion endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConvertResponse {
    /// Converted amount, rounded to two decimal places
    #[schema(example = 7.91)]
    pub converted_amount: f64,
    pub from: CurrencyCode,
    pub to: CurrencyCode,
    /// Amount before conversion
    #[schema(example = 10.0)]
    pub original_amount: f64,
}

/// One active stored rate, as exposed by the rates endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RateInfo {
    pub target: CurrencyCode,
    #[schema(example = 0.79)]
    pub rate: f64,
    /// Source API the rate came from
    #[schema(example = "open-rates")]
    pub provider: String,
    /// When the rate was last refreshed (UTC)
    #[schema(value_type = String, example = "2024-01-01T00:00:00Z")]
    pub last_updated: DateTime<Utc>,
}

/// Active rates for a base currency.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RatesResponse {
    pub base: CurrencyCode,
    pub rates: Vec<RateInfo>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Parking DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to register a new parking lot.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLotRequest {
    /// Display name of the lot
    #[schema(example = "Long Stay A")]
    pub name: String,
    /// IATA code of the airport the lot serves
    #[schema(example = "LHR")]
    pub airport_code: String,
    /// Distance from the terminal, in miles
    #[schema(example = 2.5)]
    pub distance_miles: f64,
}

/// Request to set display pricing for one (currency, region) combination.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetLotPricingRequest {
    pub currency: CurrencyCode,
    /// Two-letter region code the prices are for
    #[schema(example = "GB")]
    pub region: String,
    #[schema(example = 14.99)]
    pub daily_price: f64,
    #[schema(example = 79.99)]
    pub weekly_price: f64,
}

/// Query parameters for the parking search endpoint.
///
/// Region/currency/locale come from request-scoped geo detection upstream;
/// here they arrive as optional overrides with US/USD defaults.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SearchParams {
    /// Airport to search around (IATA code)
    #[schema(example = "LHR")]
    pub airport: String,
    /// Detected two-letter region code
    pub region: Option<String>,
    /// Detected display currency
    pub currency: Option<String>,
    /// Detected locale tag
    pub locale: Option<String>,
}

/// One lot in a search result set, localized for the requester.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LotSearchResult {
    pub id: LotId,
    #[schema(example = "Long Stay A")]
    pub name: String,
    #[schema(example = "LHR")]
    pub airport_code: String,
    #[schema(example = 10.0)]
    pub distance_miles: f64,
    /// Distance in the requester's unit system, e.g. "16.1 km"
    #[schema(example = "16.1 km")]
    pub distance_formatted: String,
    pub currency: CurrencyCode,
    /// Region the response was localized for
    #[schema(example = "GB")]
    pub region: String,
    /// Locale tag used for formatting
    #[schema(example = "en-GB")]
    pub locale: String,
    /// Pre-populated pricing row, or null when none exists for the
    /// requested currency/region
    pub pricing: Option<LotPricing>,
}
