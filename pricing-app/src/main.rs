//! # Pricing Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Initialize the store and rate provider adapters
//! - Create the pricing service and prime the rate cache
//! - Start the background refresh worker and the HTTP server

mod config;

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pricing_hex::{PricingService, inbound::HttpServer, refresh::RateRefreshWorker};
use pricing_repo::{HttpRateFetcher, build_store};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,pricing_app=debug,pricing_hex=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = config::Config::from_env()?;

    tracing::info!("Starting pricing server on port {}", config.port);
    tracing::info!("Using database: {}", config.database_url);
    tracing::info!("Using rate provider: {}", config.rate_api_url);

    // Build store (handles connection and migration)
    let store = build_store(&config.database_url).await?;
    let fetcher = HttpRateFetcher::new(&config.rate_api_url, "open-rates")?;

    // Create the pricing service and warm the rate cache
    let service = Arc::new(PricingService::new(store, fetcher));
    service.initialize_rates().await;

    // Keep the cache warm in the background
    let worker = RateRefreshWorker::new(
        service.clone(),
        Duration::from_secs(config.rate_refresh_secs),
    );
    tokio::spawn(worker.run());

    // Create and run the HTTP server
    let server = HttpServer::with_rate_limit(service, config.rate_limit_per_minute);
    let addr = format!("0.0.0.0:{}", config.port);

    server.run(&addr).await?;

    Ok(())
}
