//! Localized price presentation model.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use currency_locale::CurrencyCode;

/// A price expressed in the requester's currency and region, with the tax
/// policy applied. Derived, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedPrice {
    /// Amount after conversion and any tax-inclusive adjustment
    #[schema(example = 96.0)]
    pub price: f64,
    /// Currency the price is expressed in
    pub currency: CurrencyCode,
    /// Locale-formatted display string
    #[schema(example = "£96.00")]
    pub formatted: String,
    /// True when `price` already includes tax
    pub includes_tax: bool,
    /// Tax rate the region applies (0.0875 = 8.75%)
    #[schema(example = 0.0875)]
    pub tax_rate: f64,
}
