//! Currency codes, region tax policy, and locale display formatting.
//!
//! Pure library with no IO: everything here is a table lookup or a
//! formatting rule. The supported currency set is closed — parsing an
//! unknown code fails at the boundary instead of flowing through the
//! conversion path.
//!
//! # Example
//! ```
//! use currency_locale::{CurrencyCode, Region, format_currency, round_half_up};
//!
//! let code: CurrencyCode = "gbp".parse().unwrap();
//! assert_eq!(format_currency(code, 7.91), "£7.91");
//!
//! let policy = Region::GB.tax_policy();
//! assert_eq!(round_half_up(100.0 * 0.8 * (1.0 + policy.rate)), 96.00);
//! ```

use std::fmt;
use std::str::FromStr;

/// Conversion factor from statute miles to kilometres.
pub const MILES_TO_KM: f64 = 1.60934;

// ─────────────────────────────────────────────────────────────────────────────
// Currency codes
// ─────────────────────────────────────────────────────────────────────────────

/// Currencies supported by the pricing platform.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize, utoipa::ToSchema,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum CurrencyCode {
    USD,
    GBP,
    EUR,
}

impl CurrencyCode {
    /// Three-letter ISO code.
    pub fn code(&self) -> &'static str {
        match self {
            CurrencyCode::USD => "USD",
            CurrencyCode::GBP => "GBP",
            CurrencyCode::EUR => "EUR",
        }
    }

    /// Display symbol for the currency.
    pub fn symbol(&self) -> &'static str {
        match self {
            CurrencyCode::USD => "$",
            CurrencyCode::GBP => "£",
            CurrencyCode::EUR => "€",
        }
    }

    /// All supported currencies, in table order.
    pub fn all() -> &'static [CurrencyCode] {
        &[CurrencyCode::USD, CurrencyCode::GBP, CurrencyCode::EUR]
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Unknown currency: {0}")]
pub struct UnknownCurrency(pub String);

impl FromStr for CurrencyCode {
    type Err = UnknownCurrency;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "USD" => Ok(CurrencyCode::USD),
            "GBP" => Ok(CurrencyCode::GBP),
            "EUR" => Ok(CurrencyCode::EUR),
            _ => Err(UnknownCurrency(s.to_string())),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Regions and tax policy
// ─────────────────────────────────────────────────────────────────────────────

/// Two-letter region driving tax policy and unit presentation.
///
/// Distinct from currency: a GB request may still ask for USD pricing.
/// Unrecognized codes collapse to [`Region::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    GB,
    US,
    Other,
}

/// How a region taxes a displayed price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaxPolicy {
    /// Tax rate as a fraction (0.20 = 20%).
    pub rate: f64,
    /// True when the displayed price must already include the tax.
    pub included: bool,
}

impl Region {
    /// Maps a raw two-letter code to a region; anything unrecognized is `Other`.
    pub fn from_code(code: &str) -> Self {
        match code.to_uppercase().as_str() {
            "GB" => Region::GB,
            "US" => Region::US,
            _ => Region::Other,
        }
    }

    /// Region tax table. Fixed at compile time; not runtime-configurable.
    pub fn tax_policy(&self) -> TaxPolicy {
        match self {
            Region::GB => TaxPolicy {
                rate: 0.20,
                included: true,
            },
            Region::US => TaxPolicy {
                rate: 0.0875,
                included: false,
            },
            Region::Other => TaxPolicy {
                rate: 0.0,
                included: true,
            },
        }
    }

    /// Default locale tag for the region.
    pub fn default_locale(&self) -> &'static str {
        match self {
            Region::GB => "en-GB",
            Region::US | Region::Other => "en-US",
        }
    }

    /// Display currency assumed for the region when the requester did not
    /// state one.
    pub fn default_currency(&self) -> CurrencyCode {
        match self {
            Region::GB => CurrencyCode::GBP,
            Region::US | Region::Other => CurrencyCode::USD,
        }
    }

    /// GB displays distances in kilometres; everyone else keeps miles.
    pub fn uses_metric(&self) -> bool {
        matches!(self, Region::GB)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            Region::GB => "GB",
            Region::US => "US",
            Region::Other => "OTHER",
        };
        write!(f, "{}", code)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Rounding and formatting
// ─────────────────────────────────────────────────────────────────────────────

/// Rounds a monetary amount half-up to two decimal places.
pub fn round_half_up(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Formats an amount with the currency's symbol, two decimal places.
pub fn format_currency(currency: CurrencyCode, amount: f64) -> String {
    format!("{}{:.2}", currency.symbol(), amount)
}

/// Formats an amount for a raw currency code string.
///
/// Symbol table covers the supported set; any other code falls back to
/// `"CODE 12.34"`.
pub fn format_currency_code(code: &str, amount: f64) -> String {
    match code.parse::<CurrencyCode>() {
        Ok(currency) => format_currency(currency, amount),
        Err(_) => format!("{} {:.2}", code, amount),
    }
}

/// Formats a terminal distance for display, converting to km for metric
/// regions. One decimal place, unit suffixed.
pub fn format_distance(region: Region, miles: f64) -> String {
    if region.uses_metric() {
        format!("{:.1} km", miles * MILES_TO_KM)
    } else {
        format!("{:.1} miles", miles)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
