//! Parking lot and per-lot pricing domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use currency_locale::CurrencyCode;

use crate::error::DomainError;

/// Unique identifier for a ParkingLot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct LotId(Uuid);

impl LotId {
    /// Creates a new random LotId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a LotId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for LotId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for LotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for LotId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A supplier's parking lot near an airport.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ParkingLot {
    /// Unique identifier
    pub id: LotId,
    /// Display name of the lot
    pub name: String,
    /// IATA code of the airport the lot serves
    pub airport_code: String,
    /// Distance from the terminal, in miles
    pub distance_miles: f64,
    /// When the lot was registered
    pub created_at: DateTime<Utc>,
}

impl ParkingLot {
    /// Creates a new lot.
    ///
    /// # Validation
    /// - Name cannot be empty
    /// - Airport code must be three letters
    /// - Distance cannot be negative
    pub fn new(name: String, airport_code: String, distance_miles: f64) -> Result<Self, DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::ValidationError(
                "Lot name cannot be empty".into(),
            ));
        }
        let airport_code = airport_code.to_uppercase();
        if airport_code.len() != 3 || !airport_code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(DomainError::ValidationError(format!(
                "Invalid airport code: {}",
                airport_code
            )));
        }
        if !distance_miles.is_finite() || distance_miles < 0.0 {
            return Err(DomainError::ValidationError(
                "Distance cannot be negative".into(),
            ));
        }

        Ok(Self {
            id: LotId::new(),
            name,
            airport_code,
            distance_miles,
            created_at: Utc::now(),
        })
    }

    /// Creates a lot with all fields specified (for database reconstruction).
    pub fn from_parts(
        id: LotId,
        name: String,
        airport_code: String,
        distance_miles: f64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            airport_code,
            distance_miles,
            created_at,
        }
    }
}

/// Pre-populated display pricing for one (lot, currency, region) combination.
///
/// The search route reads these rows directly; no conversion happens at
/// search time.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LotPricing {
    pub lot_id: LotId,
    pub currency: CurrencyCode,
    /// Two-letter region code the row was priced for
    pub region: String,
    pub daily_price: f64,
    pub weekly_price: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lot_creation() {
        let lot = ParkingLot::new("Long Stay A".to_string(), "lhr".to_string(), 2.5).unwrap();
        assert_eq!(lot.airport_code, "LHR");
        assert_eq!(lot.distance_miles, 2.5);
    }

    #[test]
    fn test_empty_name_fails() {
        let result = ParkingLot::new("  ".to_string(), "LHR".to_string(), 1.0);
        assert!(matches!(result, Err(DomainError::ValidationError(_))));
    }

    #[test]
    fn test_bad_airport_code_fails() {
        let result = ParkingLot::new("Lot".to_string(), "LHRX".to_string(), 1.0);
        assert!(matches!(result, Err(DomainError::ValidationError(_))));
    }

    #[test]
    fn test_negative_distance_fails() {
        let result = ParkingLot::new("Lot".to_string(), "LHR".to_string(), -1.0);
        assert!(matches!(result, Err(DomainError::ValidationError(_))));
    }
}
