//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use currency_locale::CurrencyCode;
use pricing_types::domain::{LotId, LotPricing, ParkingLot, RateId};
use pricing_types::dto::{
    ConvertParams, ConvertResponse, CreateLotRequest, LotSearchResult, RateInfo, RatesResponse,
    SearchParams, SetLotPricingRequest,
};
use utoipa::OpenApi;

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = inline(serde_json::Value), example = json!({"status": "healthy"}))
    )
)]
async fn health() {}

/// Convert an amount between currencies
#[utoipa::path(
    get,
    path = "/api/currency/convert",
    tag = "currency",
    params(
        ("from" = String, Query, description = "Source currency code", example = "USD"),
        ("to" = String, Query, description = "Target currency code", example = "GBP"),
        ("amount" = f64, Query, description = "Amount in the source currency", example = 10.0)
    ),
    responses(
        (status = 200, description = "Converted amount, rounded to two decimal places", body = ConvertResponse),
        (status = 400, description = "Unknown currency or invalid amount")
    )
)]
async fn convert() {}

/// List active stored rates for a base currency
#[utoipa::path(
    get,
    path = "/api/currency/rates/{base}",
    tag = "currency",
    params(
        ("base" = String, Path, description = "Base currency code", example = "USD")
    ),
    responses(
        (status = 200, description = "Active rates for the base currency", body = RatesResponse),
        (status = 400, description = "Unknown currency")
    )
)]
async fn rates() {}

/// Register a new parking lot
#[utoipa::path(
    post,
    path = "/api/parking/lots",
    tag = "parking",
    request_body = CreateLotRequest,
    responses(
        (status = 201, description = "Lot registered", body = ParkingLot),
        (status = 400, description = "Invalid request")
    )
)]
async fn create_lot() {}

/// Set display pricing for one (lot, currency, region) combination
#[utoipa::path(
    put,
    path = "/api/parking/lots/{id}/pricing",
    tag = "parking",
    request_body = SetLotPricingRequest,
    params(
        ("id" = LotId, Path, description = "Lot ID (UUID)")
    ),
    responses(
        (status = 200, description = "Pricing row upserted", body = LotPricing),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Lot not found")
    )
)]
async fn set_lot_pricing() {}

/// Search lots serving an airport, localized for the requester
#[utoipa::path(
    get,
    path = "/api/parking/search",
    tag = "parking",
    params(
        ("airport" = String, Query, description = "IATA code of the airport", example = "LHR"),
        ("region" = Option<String>, Query, description = "Detected two-letter region code", example = "GB"),
        ("currency" = Option<String>, Query, description = "Detected display currency", example = "GBP"),
        ("locale" = Option<String>, Query, description = "Detected locale tag", example = "en-GB")
    ),
    responses(
        (status = 200, description = "Lots localized for the requester", body = Vec<LotSearchResult>),
        (status = 400, description = "Missing airport code")
    )
)]
async fn search() {}

/// OpenAPI documentation for the Pricing API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Airport Parking Pricing API",
        version = "1.0.0",
        description = "Locale-aware pricing for an airport-parking marketplace: cached currency conversion with graceful degradation, regional tax policies, and localized parking search.",
        license(name = "MIT"),
    ),
    paths(
        health,
        convert,
        rates,
        create_lot,
        set_lot_pricing,
        search,
    ),
    components(
        schemas(
            ConvertParams,
            ConvertResponse,
            RateInfo,
            RatesResponse,
            CreateLotRequest,
            SetLotPricingRequest,
            SearchParams,
            LotSearchResult,
            ParkingLot,
            LotPricing,
            CurrencyCode,
            LotId,
            RateId,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "currency", description = "Currency conversion and stored rates"),
        (name = "parking", description = "Parking lot inventory and localized search"),
    )
)]
pub struct ApiDoc;
