//! Rate store port trait.
//!
//! This is the primary port in our hexagonal architecture.
//! Adapters (Postgres, SQLite) will implement this trait.

use currency_locale::CurrencyCode;

use crate::domain::{ExchangeRate, LotId, LotPricing, ParkingLot};
use crate::dto::{CreateLotRequest, SetLotPricingRequest};
use crate::error::StoreError;

/// Persistence port for cached rates and parking inventory.
///
/// `save_rate` MUST be atomic: deactivating superseded rows and inserting
/// the fresh one happen in a single database transaction, so at most one
/// row per (base, target) pair is ever active.
#[async_trait::async_trait]
pub trait RateStore: Send + Sync + 'static {
    // ─────────────────────────────────────────────────────────────────────────
    // Exchange rate cache
    // ─────────────────────────────────────────────────────────────────────────

    /// Gets the single active rate for a pair, if one exists.
    async fn get_active_rate(
        &self,
        base: CurrencyCode,
        target: CurrencyCode,
    ) -> Result<Option<ExchangeRate>, StoreError>;

    /// Persists a freshly fetched rate, superseding any existing rows for
    /// the pair (deactivate + insert, atomically). Returns the new row.
    async fn save_rate(
        &self,
        base: CurrencyCode,
        target: CurrencyCode,
        rate: f64,
        provider: &str,
    ) -> Result<ExchangeRate, StoreError>;

    /// All active rates stored for a base currency.
    async fn list_active_rates(
        &self,
        base: CurrencyCode,
    ) -> Result<Vec<ExchangeRate>, StoreError>;

    /// Full history for a pair, newest first. Superseded rows included.
    async fn rate_history(
        &self,
        base: CurrencyCode,
        target: CurrencyCode,
    ) -> Result<Vec<ExchangeRate>, StoreError>;

    // ─────────────────────────────────────────────────────────────────────────
    // Parking inventory
    // ─────────────────────────────────────────────────────────────────────────

    /// Registers a new lot.
    async fn create_lot(&self, req: CreateLotRequest) -> Result<ParkingLot, StoreError>;

    /// Gets a lot by ID.
    async fn get_lot(&self, id: LotId) -> Result<Option<ParkingLot>, StoreError>;

    /// Lists lots serving an airport.
    async fn search_lots(&self, airport_code: &str) -> Result<Vec<ParkingLot>, StoreError>;

    /// Inserts or replaces the pricing row for (lot, currency, region).
    async fn set_lot_pricing(
        &self,
        lot_id: LotId,
        req: SetLotPricingRequest,
    ) -> Result<LotPricing, StoreError>;

    /// Direct pricing lookup for the search route. No conversion happens
    /// here; rows are pre-populated per currency/region.
    async fn get_lot_pricing(
        &self,
        lot_id: LotId,
        currency: CurrencyCode,
        region: &str,
    ) -> Result<Option<LotPricing>, StoreError>;
}
