//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use currency_locale::CurrencyCode;
use pricing_types::{
    AppError, ConvertParams, ConvertResponse, CreateLotRequest, LotId, RateFetcher, RateInfo,
    RateStore, RatesResponse, SearchParams, SetLotPricingRequest,
};

use crate::{PricingService, RequestLocale};

/// Application state shared across handlers.
pub struct AppState<S: RateStore, F: RateFetcher> {
    pub service: Arc<PricingService<S, F>>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = serde_json::json!({
            "error": message,
            "code": status.as_u16()
        });

        (status, Json(body)).into_response()
    }
}

fn parse_currency(code: &str) -> Result<CurrencyCode, ApiError> {
    code.parse()
        .map_err(|_| AppError::BadRequest(format!("Unknown currency: {}", code)).into())
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// Convert an amount between currencies.
#[tracing::instrument(skip(state), fields(from = %params.from, to = %params.to, amount = params.amount))]
pub async fn convert<S: RateStore, F: RateFetcher>(
    State(state): State<Arc<AppState<S, F>>>,
    Query(params): Query<ConvertParams>,
) -> Result<impl IntoResponse, ApiError> {
    let from = parse_currency(&params.from)?;
    let to = parse_currency(&params.to)?;

    if !params.amount.is_finite() || params.amount < 0.0 {
        return Err(AppError::BadRequest("Amount must be a non-negative number".into()).into());
    }

    let converted = state.service.convert(params.amount, from, to).await;

    Ok(Json(ConvertResponse {
        converted_amount: converted,
        from,
        to,
        original_amount: params.amount,
    }))
}

/// List the active stored rates for a base currency.
#[tracing::instrument(skip(state), fields(base = %base))]
pub async fn rates<S: RateStore, F: RateFetcher>(
    State(state): State<Arc<AppState<S, F>>>,
    Path(base): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let base = parse_currency(&base)?;

    let rates = state.service.active_rates(base).await?;
    let rates = rates
        .into_iter()
        .map(|r| RateInfo {
            target: r.target_currency,
            rate: r.rate,
            provider: r.provider,
            last_updated: r.last_updated,
        })
        .collect();

    Ok(Json(RatesResponse { base, rates }))
}

/// Register a new parking lot.
#[tracing::instrument(skip(state), fields(name = %req.name, airport = %req.airport_code))]
pub async fn create_lot<S: RateStore, F: RateFetcher>(
    State(state): State<Arc<AppState<S, F>>>,
    Json(req): Json<CreateLotRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let lot = state.service.create_lot(req).await?;
    Ok((StatusCode::CREATED, Json(lot)))
}

/// Set display pricing for one (lot, currency, region) combination.
#[tracing::instrument(skip(state, req), fields(lot_id = %id))]
pub async fn set_lot_pricing<S: RateStore, F: RateFetcher>(
    State(state): State<Arc<AppState<S, F>>>,
    Path(id): Path<String>,
    Json(req): Json<SetLotPricingRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let lot_id: LotId = id
        .parse()
        .map_err(|_| AppError::BadRequest("Invalid lot ID".into()))?;

    let pricing = state.service.set_lot_pricing(lot_id, req).await?;
    Ok(Json(pricing))
}

/// Search lots serving an airport, localized for the requester.
#[tracing::instrument(skip(state), fields(airport = %params.airport))]
pub async fn search<S: RateStore, F: RateFetcher>(
    State(state): State<Arc<AppState<S, F>>>,
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse, ApiError> {
    let airport = params.airport.trim().to_uppercase();
    if airport.is_empty() {
        return Err(AppError::BadRequest("Airport code cannot be empty".into()).into());
    }

    let locale = RequestLocale::from_params(params.region, params.currency, params.locale);
    let results = state.service.search_lots(&airport, &locale).await?;

    Ok(Json(results))
}
