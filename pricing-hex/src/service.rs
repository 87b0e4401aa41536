//! Pricing Application Service
//!
//! Orchestrates the rate cache, the external fetcher, and localization
//! through the port traits. Contains NO infrastructure logic.

use chrono::{Duration, Utc};
use tracing::{error, warn};

use currency_locale::{
    CurrencyCode, Region, format_currency, format_distance, round_half_up,
};
use pricing_types::{
    AppError, CreateLotRequest, ExchangeRate, LocalizedPrice, LotId, LotPricing, LotSearchResult,
    ParkingLot, RateFetcher, RateStore, SetLotPricingRequest,
};

/// How long a cached rate counts as fresh, in hours. Compiled constant,
/// not runtime configuration.
pub const RATE_FRESHNESS_HOURS: i64 = 6;

fn rate_freshness() -> Duration {
    Duration::hours(RATE_FRESHNESS_HOURS)
}

/// Request-scoped localization context for the search route.
///
/// Upstream geo detection is an external collaborator; here the detected
/// values arrive as optional parameters with region-derived defaults.
#[derive(Debug, Clone)]
pub struct RequestLocale {
    /// Raw two-letter region code, uppercased
    pub region_code: String,
    pub region: Region,
    pub currency: CurrencyCode,
    pub locale: String,
}

impl RequestLocale {
    pub fn from_params(
        region: Option<String>,
        currency: Option<String>,
        locale: Option<String>,
    ) -> Self {
        let region_code = region.unwrap_or_else(|| "US".to_string()).to_uppercase();
        let region = Region::from_code(&region_code);

        // An unparseable currency never fails the search path; fall back to
        // the region default.
        let currency = currency
            .and_then(|c| c.parse::<CurrencyCode>().ok())
            .unwrap_or_else(|| region.default_currency());

        let locale = locale.unwrap_or_else(|| region.default_locale().to_string());

        Self {
            region_code,
            region,
            currency,
            locale,
        }
    }
}

/// Application service for currency conversion and price localization.
///
/// Generic over `S: RateStore` and `F: RateFetcher` - the adapters are
/// injected at compile time. This enables:
/// - Swapping the store or provider without code changes
/// - Testing with mock ports and call-count assertions
/// - Compile-time checks for port implementation
pub struct PricingService<S: RateStore, F: RateFetcher> {
    store: S,
    fetcher: F,
}

impl<S: RateStore, F: RateFetcher> PricingService<S, F> {
    /// Creates a new pricing service with the given adapters.
    pub fn new(store: S, fetcher: F) -> Self {
        Self { store, fetcher }
    }

    /// Returns a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Exchange rates
    // ─────────────────────────────────────────────────────────────────────────

    /// Resolves the conversion rate for a pair.
    ///
    /// Cache-first with a degradation ladder; this never fails:
    /// 1. Identity pairs are `1.0` without any lookup.
    /// 2. A cached active rate younger than [`RATE_FRESHNESS_HOURS`] wins.
    /// 3. Otherwise fetch from the provider, persist, and return it.
    /// 4. On fetch failure, a stale cached rate is better than nothing.
    /// 5. With no cache at all, degrade to 1:1 parity so pricing keeps
    ///    rendering.
    pub async fn exchange_rate(&self, from: CurrencyCode, to: CurrencyCode) -> f64 {
        if from == to {
            return 1.0;
        }

        let cached = match self.store.get_active_rate(from, to).await {
            Ok(cached) => cached,
            Err(e) => {
                warn!(%from, %to, error = %e, "Rate cache read failed; treating as miss");
                None
            }
        };

        if let Some(rate) = &cached {
            if rate.is_fresh(rate_freshness(), Utc::now()) {
                return rate.rate;
            }
        }

        match self.fetcher.fetch_rate(from, to).await {
            Ok(fresh) => {
                if let Err(e) = self
                    .store
                    .save_rate(from, to, fresh, self.fetcher.provider_name())
                    .await
                {
                    // The fetched rate is still good for this request; the
                    // next caller just pays another fetch.
                    warn!(%from, %to, error = %e, "Failed to persist fresh exchange rate");
                }
                fresh
            }
            Err(e) => match cached {
                Some(stale) => {
                    warn!(%from, %to, error = %e, "Rate fetch failed; using expired cached rate");
                    stale.rate
                }
                None => {
                    error!(%from, %to, error = %e, "Rate fetch failed with no cached rate; using 1:1 parity");
                    1.0
                }
            },
        }
    }

    /// Converts an amount between currencies, rounded half-up to two
    /// decimal places.
    pub async fn convert(&self, amount: f64, from: CurrencyCode, to: CurrencyCode) -> f64 {
        round_half_up(amount * self.exchange_rate(from, to).await)
    }

    /// Primes the cache for every ordered pair of distinct supported
    /// currencies. Individual failures degrade inside `exchange_rate` and
    /// never abort the remaining pairs.
    pub async fn initialize_rates(&self) {
        for &from in CurrencyCode::all() {
            for &to in CurrencyCode::all() {
                if from == to {
                    continue;
                }
                let _ = self.exchange_rate(from, to).await;
            }
        }
    }

    /// Active stored rates for a base currency.
    pub async fn active_rates(&self, base: CurrencyCode) -> Result<Vec<ExchangeRate>, AppError> {
        self.store.list_active_rates(base).await.map_err(Into::into)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Localized pricing
    // ─────────────────────────────────────────────────────────────────────────

    /// Expresses a base price in the target currency with the region's tax
    /// policy applied.
    ///
    /// Tax-inclusive regions bake the tax into the displayed price;
    /// tax-separate regions leave the price unchanged and surface the rate
    /// for the caller to display alongside it.
    pub async fn localized_pricing(
        &self,
        base_price: f64,
        base_currency: CurrencyCode,
        target_currency: CurrencyCode,
        region: Region,
    ) -> LocalizedPrice {
        let converted = self.convert(base_price, base_currency, target_currency).await;
        let policy = region.tax_policy();

        let price = if policy.included {
            round_half_up(converted * (1.0 + policy.rate))
        } else {
            converted
        };

        LocalizedPrice {
            price,
            currency: target_currency,
            formatted: format_currency(target_currency, price),
            includes_tax: policy.included,
            tax_rate: policy.rate,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Parking search
    // ─────────────────────────────────────────────────────────────────────────

    /// Registers a new lot.
    pub async fn create_lot(&self, req: CreateLotRequest) -> Result<ParkingLot, AppError> {
        self.store.create_lot(req).await.map_err(Into::into)
    }

    /// Sets display pricing for one (lot, currency, region) combination.
    pub async fn set_lot_pricing(
        &self,
        lot_id: LotId,
        req: SetLotPricingRequest,
    ) -> Result<LotPricing, AppError> {
        self.store
            .set_lot_pricing(lot_id, req)
            .await
            .map_err(|e| match e {
                pricing_types::StoreError::NotFound => {
                    AppError::NotFound(format!("Lot {}", lot_id))
                }
                other => other.into(),
            })
    }

    /// Lists lots for an airport, localized for the requester.
    ///
    /// The pricing attachment is a direct store lookup of pre-populated
    /// rows; no conversion happens at search time, and pricing problems
    /// degrade to `pricing: null` rather than failing the search.
    pub async fn search_lots(
        &self,
        airport: &str,
        locale: &RequestLocale,
    ) -> Result<Vec<LotSearchResult>, AppError> {
        let lots = self.store.search_lots(airport).await?;

        let mut results = Vec::with_capacity(lots.len());
        for lot in lots {
            let pricing = match self
                .store
                .get_lot_pricing(lot.id, locale.currency, &locale.region_code)
                .await
            {
                Ok(pricing) => pricing,
                Err(e) => {
                    warn!(lot_id = %lot.id, error = %e, "Pricing lookup failed; returning null pricing");
                    None
                }
            };

            results.push(LotSearchResult {
                id: lot.id,
                name: lot.name,
                airport_code: lot.airport_code,
                distance_miles: lot.distance_miles,
                distance_formatted: format_distance(locale.region, lot.distance_miles),
                currency: locale.currency,
                region: locale.region_code.clone(),
                locale: locale.locale.clone(),
                pricing,
            });
        }

        Ok(results)
    }
}
