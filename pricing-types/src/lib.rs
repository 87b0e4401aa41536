//! # Pricing Types
//!
//! Domain types and port traits for the parking pricing service.
//! This crate has ZERO external IO dependencies - only data structures,
//! business rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (ExchangeRate, ParkingLot, LocalizedPrice)
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Data Transfer Objects for API boundaries
//! - `error/` - Domain and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use currency_locale::{CurrencyCode, Region, TaxPolicy};
pub use domain::{ExchangeRate, LocalizedPrice, LotId, LotPricing, ParkingLot, RateId};
pub use dto::*;
pub use error::{AppError, DomainError, FetchError, StoreError};
pub use ports::{RateFetcher, RateStore};
