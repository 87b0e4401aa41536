//! # Pricing Hex
//!
//! Application service layer and HTTP adapter for the pricing service.
//!
//! ## Architecture
//!
//! - `service/` - Application service (orchestrates rates and localization)
//! - `inbound/` - HTTP adapter (Axum server)
//! - `refresh/` - Background worker that keeps the rate cache warm
//!
//! The service is generic over `S: RateStore` and `F: RateFetcher`,
//! allowing different store and provider implementations to be injected.

pub mod inbound;
pub mod openapi;
pub mod refresh;
pub mod service;

#[cfg(test)]
mod service_tests;

pub use service::{PricingService, RequestLocale, RATE_FRESHNESS_HOURS};
