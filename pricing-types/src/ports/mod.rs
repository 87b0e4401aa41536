//! Port traits (interfaces for adapters).
//!
//! These are the contracts that adapters must implement.
//! The application layer depends on these traits, not concrete implementations.

mod fetcher;
mod store;

pub use fetcher::RateFetcher;
pub use store::RateStore;
