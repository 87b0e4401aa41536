//! Domain models for the pricing service.

pub mod lot;
pub mod price;
pub mod rate;

pub use lot::{LotId, LotPricing, ParkingLot};
pub use price::LocalizedPrice;
pub use rate::{ExchangeRate, RateId};
