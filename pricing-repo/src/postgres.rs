//! PostgreSQL store adapter.

use async_trait::async_trait;
use sqlx::PgPool;

use currency_locale::CurrencyCode;
use pricing_types::{
    CreateLotRequest, DomainError, ExchangeRate, LotId, LotPricing, ParkingLot, RateStore,
    SetLotPricingRequest, StoreError,
};

use crate::types::{DbExchangeRate, DbLotPricing, DbParkingLot};

// ─────────────────────────────────────────────────────────────────────────────
// PostgreSQL Store
// ─────────────────────────────────────────────────────────────────────────────

/// PostgreSQL store implementation.
pub struct PostgresStore {
    pool: PgPool,
}

/// Executes SQL statements from a migration file, splitting by semicolons.
async fn execute_migration(pool: &PgPool, sql: &str, name: &str) -> Result<(), anyhow::Error> {
    for statement in sql.split(';') {
        let stmt = statement.trim();
        if !stmt.is_empty() {
            sqlx::query(stmt)
                .execute(pool)
                .await
                .map_err(|e| anyhow::anyhow!("Migration {} failed: {}", name, e))?;
        }
    }
    Ok(())
}

/// Runs all database migrations.
async fn run_migrations(pool: &PgPool) -> Result<(), anyhow::Error> {
    execute_migration(
        pool,
        include_str!("../migrations/0001_create_exchange_rates_pg.sql"),
        "0001",
    )
    .await?;

    execute_migration(
        pool,
        include_str!("../migrations/0002_create_parking_pg.sql"),
        "0002",
    )
    .await?;

    Ok(())
}

impl PostgresStore {
    /// Creates a new PostgreSQL store with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPool::connect(database_url).await?;
        run_migrations(&pool).await?;
        Ok(Self { pool })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Store implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl RateStore for PostgresStore {
    async fn get_active_rate(
        &self,
        base: CurrencyCode,
        target: CurrencyCode,
    ) -> Result<Option<ExchangeRate>, StoreError> {
        let row: Option<DbExchangeRate> = sqlx::query_as(
            r#"SELECT id, base_currency, target_currency, rate, provider, last_updated, is_active
               FROM exchange_rates
               WHERE base_currency = $1 AND target_currency = $2 AND is_active = TRUE"#,
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

        let mut db_tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StoreError::Transaction(e.to_string()))?;

        sqlx::query(
            r#"UPDATE exchange_rates SET is_active = FALSE
               WHERE base_currency = $1 AND target_currency = $2 AND is_active = TRUE"#,
        )
        .bind(base.code())
        .bind(target.code())
        .execute(&mut *db_tx)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        sqlx::query(
            r#"INSERT INTO exchange_rates (id, base_currency, target_currency, rate, provider, last_updated, is_active)
               VALUES ($1, $2, $3, $4, $5, $6, TRUE)"#,
        )
        .bind(fresh.id.as_uuid())
        .bind(base.code())
        .bind(target.code())
        .bind(fresh.rate.to_string())
        .bind(&fresh.provider)
        .bind(fresh.last_updated)
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
               WHERE base_currency = $1 AND is_active = TRUE
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
               WHERE base_currency = $1 AND target_currency = $2
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
               VALUES ($1, $2, $3, $4, $5)"#,
        )
        .bind(lot.id.as_uuid())
        .bind(&lot.name)
        .bind(&lot.airport_code)
        .bind(lot.distance_miles)
        .bind(lot.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(lot)
    }

    async fn get_lot(&self, id: LotId) -> Result<Option<ParkingLot>, StoreError> {
        let row: Option<DbParkingLot> = sqlx::query_as(
            r#"SELECT id, name, airport_code, distance_miles, created_at
               FROM parking_lots WHERE id = $1"#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        row.map(DbParkingLot::into_domain).transpose()
    }

    async fn search_lots(&self, airport_code: &str) -> Result<Vec<ParkingLot>, StoreError> {
        let rows: Vec<DbParkingLot> = sqlx::query_as(
            r#"SELECT id, name, airport_code, distance_miles, created_at
               FROM parking_lots WHERE airport_code = $1
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
            r#"INSERT INTO lot_pricing (lot_id, currency, region, daily_price, weekly_price)
               VALUES ($1, $2, $3, $4, $5)
               ON CONFLICT (lot_id, currency, region)
               DO UPDATE SET daily_price = EXCLUDED.daily_price, weekly_price = EXCLUDED.weekly_price"#,
        )
        .bind(lot_id.as_uuid())
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
               FROM lot_pricing WHERE lot_id = $1 AND currency = $2 AND region = $3"#,
        )
        .bind(lot_id.as_uuid())
        .bind(currency.code())
        .bind(region.to_uppercase())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        row.map(DbLotPricing::into_domain).transpose()
    }
}
