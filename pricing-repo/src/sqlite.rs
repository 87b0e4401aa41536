//! SQLite store adapter.

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::SqliteConnectOptions;
use std::str::FromStr;

use currency_locale::CurrencyCode;
use pricing_types::{
    CreateLotRequest, DomainError, ExchangeRate, LotId, LotPricing, ParkingLot, RateStore,
    SetLotPricingRequest, StoreError,
};

use crate::types::{DbExchangeRate, DbLotPricing, DbParkingLot};

// ─────────────────────────────────────────────────────────────────────────────
// SQLite Store
// ─────────────────────────────────────────────────────────────────────────────

/// SQLite store implementation.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Creates a new SQLite store with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        // Ensure on-disk SQLite target directory exists (no-op for in-memory).
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            // Remove query parameters
            let path = path.split('?').next().unwrap_or(path);
            if path != ":memory:" {
                let p = std::path::Path::new(path);
                if let Some(parent) = p.parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePool::connect_with(options).await?;

        let ddl = include_str!("../migrations/0001_create_exchange_rates.sql");
        sqlx::query(ddl).execute(&pool).await?;

        let ddl_parking = include_str!("../migrations/0002_create_parking.sql");
        sqlx::query(ddl_parking).execute(&pool).await?;

        Ok(Self { pool })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Store implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl RateStore for SqliteStore {
    async fn get_active_rate(
        &self,
        base: CurrencyCode,
        target: CurrencyCode,
    ) -> Result<Option<ExchangeRate>, StoreError> {
        let row: Option<DbExchangeRate> = sqlx::query_as(
            r#"SELECT id, base_currency, target_currency, rate, provider, last_updated, is_active
               FROM exchange_rates
               WHERE base_currency = ? AND target_currency = ? AND is_active = 1"#,
        )
        .bind(base.code())
        .bind(target.code())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        row.map(DbExchangeRate::into_domain).transpose()
    }

    async fn save_rate(
        &self,
        base: CurrencyCode,
        target: CurrencyCode,
        rate: f64,
        provider: &str,
    ) -> Result<ExchangeRate, StoreError> {
        let fresh = ExchangeRate::new(base, target, rate, provider.to_string())
            .map_err(StoreError::Domain)?;

        // Deactivate + insert in one transaction so the pair never has two
        // active rows, even under concurrent refreshes.
        let mut db_tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StoreError::Transaction(e.to_string()))?;

        sqlx::query(
            r#"UPDATE exchange_rates SET is_active = 0
               WHERE base_currency = ? AND target_currency = ? AND is_active = 1"#,
        )
        .bind(base.code())
        .bind(target.code())
        .execute(&mut *db_tx)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        sqlx::query(
            r#"INSERT INTO exchange_rates (id, base_currency, target_currency, rate, provider, last_updated, is_active)
               VALUES (?, ?, ?, ?, ?, ?, 1)"#,
        )
        .bind(fresh.id.to_string())
        .bind(base.code())
        .bind(target.code())
        .bind(fresh.rate.to_string())
        .bind(&fresh.provider)
        .bind(fresh.last_updated.to_rfc3339())
        .execute(&mut *db_tx)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        db_tx
            .commit()
            .await
            .map_err(|e| StoreError::Transaction(e.to_string()))?;

        Ok(fresh)
    }

    async fn list_active_rates(
        &self,
        base: CurrencyCode,
    ) -> Result<Vec<ExchangeRate>, StoreError> {
        let rows: Vec<DbExchangeRate> = sqlx::query_as(
            r#"SELECT id, base_currency, target_currency, rate, provider, last_updated, is_active
               FROM exchange_rates
               WHERE base_currency = ? AND is_active = 1
               ORDER BY target_currency"#,
        )
        .bind(base.code())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        rows.into_iter().map(DbExchangeRate::into_domain).collect()
    }

    async fn rate_history(
        &self,
        base: CurrencyCode,
        target: CurrencyCode,
    ) -> Result<Vec<ExchangeRate>, StoreError> {
        let rows: Vec<DbExchangeRate> = sqlx::query_as(
            r#"SELECT id, base_currency, target_currency, rate, provider, last_updated, is_active
               FROM exchange_rates
               WHERE base_currency = ? AND target_currency = ?
               ORDER BY last_updated DESC"#,
        )
        .bind(base.code())
        .bind(target.code())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        rows.into_iter().map(DbExchangeRate::into_domain).collect()
    }

    async fn create_lot(&self, req: CreateLotRequest) -> Result<ParkingLot, StoreError> {
        let lot = ParkingLot::new(req.name, req.airport_code, req.distance_miles)
            .map_err(StoreError::Domain)?;

        sqlx::query(
            r#"INSERT INTO parking_lots (id, name, airport_code, distance_miles, created_at)
               VALUES (?, ?, ?, ?, ?)"#,
        )
        .bind(lot.id.to_string())
        .bind(&lot.name)
        .bind(&lot.airport_code)
        .bind(lot.distance_miles)
        .bind(lot.created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(lot)
    }

    async fn get_lot(&self, id: LotId) -> Result<Option<ParkingLot>, StoreError> {
        let row: Option<DbParkingLot> = sqlx::query_as(
            r#"SELECT id, name, airport_code, distance_miles, created_at
               FROM parking_lots WHERE id = ?"#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        row.map(DbParkingLot::into_domain).transpose()
    }

    async fn search_lots(&self, airport_code: &str) -> Result<Vec<ParkingLot>, StoreError> {
        let rows: Vec<DbParkingLot> = sqlx::query_as(
            r#"SELECT id, name, airport_code, distance_miles, created_at
               FROM parking_lots WHERE airport_code = ?
               ORDER BY distance_miles ASC"#,
        )
        .bind(airport_code.to_uppercase())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        rows.into_iter().map(DbParkingLot::into_domain).collect()
    }

    async fn set_lot_pricing(
        &self,
        lot_id: LotId,
        req: SetLotPricingRequest,
    ) -> Result<LotPricing, StoreError> {
        if req.daily_price < 0.0 || req.weekly_price < 0.0 {
            return Err(StoreError::Domain(DomainError::ValidationError(
                "Prices cannot be negative".into(),
            )));
        }

        if self.get_lot(lot_id).await?.is_none() {
            return Err(StoreError::NotFound);
        }

        let region = req.region.to_uppercase();

        sqlx::query(
            r#"INSERT OR REPLACE INTO lot_pricing (lot_id, currency, region, daily_price, weekly_price)
               VALUES (?, ?, ?, ?, ?)"#,
        )
        .bind(lot_id.to_string())
        .bind(req.currency.code())
        .bind(&region)
        .bind(req.daily_price)
        .bind(req.weekly_price)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(LotPricing {
            lot_id,
            currency: req.currency,
            region,
            daily_price: req.daily_price,
            weekly_price: req.weekly_price,
        })
    }

    async fn get_lot_pricing(
        &self,
        lot_id: LotId,
        currency: CurrencyCode,
        region: &str,
    ) -> Result<Option<LotPricing>, StoreError> {
        let row: Option<DbLotPricing> = sqlx::query_as(
            r#"SELECT lot_id, currency, region, daily_price, weekly_price
               FROM lot_pricing WHERE lot_id = ? AND currency = ? AND region = ?"#,
        )
        .bind(lot_id.to_string())
        .bind(currency.code())
        .bind(region.to_uppercase())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        row.map(DbLotPricing::into_domain).transpose()
    }
}
