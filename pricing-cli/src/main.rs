//! Pricing CLI
//!
//! Command-line interface for the Pricing API.

use anyhow::Result;
use clap::{Parser, Subcommand};

use currency_locale::CurrencyCode;
use pricing_client::PricingClient;
use pricing_types::LotId;

#[derive(Parser)]
#[command(name = "pricing")]
#[command(author, version, about = "Pricing API CLI client", long_about = None)]
struct Cli {
    /// Base URL of the Pricing API
    #[arg(long, env = "PRICING_API_URL", default_value = "http://localhost:3000")]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an amount between currencies
    Convert {
        #[arg(long)]
        amount: f64,
        /// Source currency (USD, GBP, EUR)
        #[arg(long)]
        from: String,
        /// Target currency (USD, GBP, EUR)
        #[arg(long)]
        to: String,
    },
    /// List active stored rates for a base currency
    Rates {
        /// Base currency (USD, GBP, EUR)
        base: String,
    },
    /// Parking lot operations
    Lot {
        #[command(subcommand)]
        action: LotCommands,
    },
    /// Search lots serving an airport
    Search {
        /// Airport IATA code
        airport: String,
        /// Two-letter region code (e.g. GB)
        #[arg(long)]
        region: Option<String>,
        /// Display currency (USD, GBP, EUR)
        #[arg(long)]
        currency: Option<String>,
        /// Locale tag (e.g. en-GB)
        #[arg(long)]
        locale: Option<String>,
    },
    /// Check API health
    Health,
}

#[derive(Subcommand)]
enum LotCommands {
    /// Register a new parking lot
    Create {
        /// Display name of the lot
        name: String,
        /// Airport IATA code
        #[arg(long)]
        airport: String,
        /// Distance from the terminal, in miles
        #[arg(long)]
        distance_miles: f64,
    },
    /// Set display pricing for a lot
    Price {
        /// Lot ID (UUID)
        id: String,
        #[arg(long)]
        currency: String,
        /// Two-letter region code the prices are for
        #[arg(long)]
        region: String,
        #[arg(long)]
        daily: f64,
        #[arg(long)]
        weekly: f64,
    },
}

fn parse_currency(s: &str) -> Result<CurrencyCode> {
    s.parse()
        .map_err(|_| anyhow::anyhow!("Unknown currency: {}. Supported: USD, GBP, EUR", s))
}

fn parse_lot_id(s: &str) -> Result<LotId> {
    s.parse().map_err(|_| anyhow::anyhow!("Invalid lot ID: {}", s))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let client = PricingClient::new(&cli.api_url);

    match cli.command {
        Commands::Health => {
            let healthy = client.health().await?;
            if healthy {
                println!("✓ API is healthy");
            } else {
                println!("✗ API is not healthy");
                std::process::exit(1);
            }
        }

        Commands::Convert { amount, from, to } => {
            let from = parse_currency(&from)?;
            let to = parse_currency(&to)?;
            let resp = client.convert(amount, from, to).await?;
            println!("{}", serde_json::to_string_pretty(&resp)?);
        }

        Commands::Rates { base } => {
            let base = parse_currency(&base)?;
            let resp = client.rates(base).await?;
            println!("{}", serde_json::to_string_pretty(&resp)?);
        }

        Commands::Lot { action } => match action {
            LotCommands::Create {
                name,
                airport,
                distance_miles,
            } => {
                let lot = client.create_lot(&name, &airport, distance_miles).await?;
                println!("{}", serde_json::to_string_pretty(&lot)?);
            }
            LotCommands::Price {
                id,
                currency,
                region,
                daily,
                weekly,
            } => {
                let lot_id = parse_lot_id(&id)?;
                let currency = parse_currency(&currency)?;
                let pricing = client
                    .set_lot_pricing(lot_id, currency, &region, daily, weekly)
                    .await?;
                println!("{}", serde_json::to_string_pretty(&pricing)?);
            }
        },

        Commands::Search {
            airport,
            region,
            currency,
            locale,
        } => {
            let currency = currency.as_deref().map(parse_currency).transpose()?;
            let results = client
                .search(&airport, region.as_deref(), currency, locale.as_deref())
                .await?;
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
    }

    Ok(())
}
