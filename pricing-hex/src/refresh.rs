//! Background rate refresh worker.
//!
//! Re-primes the exchange-rate cache on a fixed interval so request paths
//! mostly hit fresh cached rows instead of paying a provider round trip.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{info, instrument};

use pricing_types::{RateFetcher, RateStore};

use crate::PricingService;

pub struct RateRefreshWorker<S: RateStore, F: RateFetcher> {
    service: Arc<PricingService<S, F>>,
    interval: Duration,
}

impl<S: RateStore, F: RateFetcher> RateRefreshWorker<S, F> {
    pub fn new(service: Arc<PricingService<S, F>>, interval: Duration) -> Self {
        Self { service, interval }
    }

    /// Runs forever. Each cycle walks every supported pair; individual
    /// failures degrade inside the service and never stop the worker.
    #[instrument(skip(self))]
    pub async fn run(self) {
        info!(
            "Starting rate refresh worker, interval {}s",
            self.interval.as_secs()
        );
        loop {
            sleep(self.interval).await;
            info!("Refreshing exchange rate cache");
            self.service.initialize_rates().await;
        }
    }
}
