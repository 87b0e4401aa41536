//! Shared database types with feature-gated fields for SQLite and PostgreSQL.

use sqlx::FromRow;

use currency_locale::CurrencyCode;
use pricing_types::{ExchangeRate, LotId, LotPricing, ParkingLot, RateId, StoreError};

// ─────────────────────────────────────────────────────────────────────────────
// Feature-gated imports
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(not(feature = "sqlite"))]
use chrono::{DateTime, Utc};
#[cfg(not(feature = "sqlite"))]
use uuid::Uuid;

// ─────────────────────────────────────────────────────────────────────────────
// Database row structs (derive FromRow for automatic mapping)
// ─────────────────────────────────────────────────────────────────────────────

/// Exchange rate row from database. The rate itself is stored as text and
/// parsed on the way out.
#[derive(FromRow)]
pub struct DbExchangeRate {
    #[cfg(not(feature = "sqlite"))]
    pub id: Uuid,
    #[cfg(feature = "sqlite")]
    pub id: String,

    pub base_currency: String,
    pub target_currency: String,
    pub rate: String,
    pub provider: String,

    #[cfg(not(feature = "sqlite"))]
    pub last_updated: DateTime<Utc>,
    #[cfg(feature = "sqlite")]
    pub last_updated: String,

    #[cfg(not(feature = "sqlite"))]
    pub is_active: bool,
    #[cfg(feature = "sqlite")]
    pub is_active: i64,
}

/// Parking lot row from database.
#[derive(FromRow)]
pub struct DbParkingLot {
    #[cfg(not(feature = "sqlite"))]
    pub id: Uuid,
    #[cfg(feature = "sqlite")]
    pub id: String,

    pub name: String,
    pub airport_code: String,
    pub distance_miles: f64,

    #[cfg(not(feature = "sqlite"))]
    pub created_at: DateTime<Utc>,
    #[cfg(feature = "sqlite")]
    pub created_at: String,
}

/// Lot pricing row from database.
#[derive(FromRow)]
pub struct DbLotPricing {
    #[cfg(not(feature = "sqlite"))]
    pub lot_id: Uuid,
    #[cfg(feature = "sqlite")]
    pub lot_id: String,

    pub currency: String,
    pub region: String,
    pub daily_price: f64,
    pub weekly_price: f64,
}

// ─────────────────────────────────────────────────────────────────────────────
// Parsing helpers
// ─────────────────────────────────────────────────────────────────────────────

pub fn parse_currency(s: &str) -> Result<CurrencyCode, StoreError> {
    s.parse::<CurrencyCode>()
        .map_err(|e| StoreError::Database(e.to_string()))
}

fn parse_rate(s: &str) -> Result<f64, StoreError> {
    s.parse::<f64>()
        .map_err(|_| StoreError::Database(format!("Invalid stored rate: {}", s)))
}

// ─────────────────────────────────────────────────────────────────────────────
// Domain conversion (feature-gated implementations)
// ─────────────────────────────────────────────────────────────────────────────

impl DbExchangeRate {
    /// Convert database row to domain ExchangeRate.
    pub fn into_domain(self) -> Result<ExchangeRate, StoreError> {
        let base = parse_currency(&self.base_currency)?;
        let target = parse_currency(&self.target_currency)?;
        let rate = parse_rate(&self.rate)?;

        #[cfg(not(feature = "sqlite"))]
        let (id, last_updated, is_active) =
            (RateId::from_uuid(self.id), self.last_updated, self.is_active);

        #[cfg(feature = "sqlite")]
        let (id, last_updated, is_active) = {
            let uuid =
                uuid::Uuid::parse_str(&self.id).map_err(|e| StoreError::Database(e.to_string()))?;
            let dt = chrono::DateTime::parse_from_rfc3339(&self.last_updated)
                .map_err(|e| StoreError::Database(e.to_string()))?
                .with_timezone(&chrono::Utc);
            (RateId::from_uuid(uuid), dt, self.is_active != 0)
        };

        Ok(ExchangeRate::from_parts(
            id,
            base,
            target,
            rate,
            self.provider,
            last_updated,
            is_active,
        ))
    }
}

impl DbParkingLot {
    /// Convert database row to domain ParkingLot.
    pub fn into_domain(self) -> Result<ParkingLot, StoreError> {
        #[cfg(not(feature = "sqlite"))]
        let (id, created_at) = (LotId::from_uuid(self.id), self.created_at);

        #[cfg(feature = "sqlite")]
        let (id, created_at) = {
            let uuid =
                uuid::Uuid::parse_str(&self.id).map_err(|e| StoreError::Database(e.to_string()))?;
            let dt = chrono::DateTime::parse_from_rfc3339(&self.created_at)
                .map_err(|e| StoreError::Database(e.to_string()))?
                .with_timezone(&chrono::Utc);
            (LotId::from_uuid(uuid), dt)
        };

        Ok(ParkingLot::from_parts(
            id,
            self.name,
            self.airport_code,
            self.distance_miles,
            created_at,
        ))
    }
}

impl DbLotPricing {
    /// Convert database row to domain LotPricing.
    pub fn into_domain(self) -> Result<LotPricing, StoreError> {
        let currency = parse_currency(&self.currency)?;

        #[cfg(not(feature = "sqlite"))]
        let lot_id = LotId::from_uuid(self.lot_id);

        #[cfg(feature = "sqlite")]
        let lot_id = {
            let uuid = uuid::Uuid::parse_str(&self.lot_id)
                .map_err(|e| StoreError::Database(e.to_string()))?;
            LotId::from_uuid(uuid)
        };

        Ok(LotPricing {
            lot_id,
            currency,
            region: self.region,
            daily_price: self.daily_price,
            weekly_price: self.weekly_price,
        })
    }
}
