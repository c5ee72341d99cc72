use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{DateTime, NaiveDateTime, Utc};

use crate::{
    error::{ApiError, ApiResult, ErrorBody},
    main_lib::AppState,
    models::{HistoryQuery, QuoteResponse},
};
use cambio_core::constants::HISTORY_TIMESTAMP_FORMAT;

/// Latest BRL→USD quote. Falls back to 5.00 when the provider is unavailable.
#[utoipa::path(
    get,
    path = "/rate/latest",
    responses((status = 200, body = QuoteResponse))
)]
pub async fn latest_rate(State(state): State<Arc<AppState>>) -> Json<QuoteResponse> {
    let quote = state.rate_service.fetch_latest_quote().await;
    Json(quote.into())
}

/// Stored quotes between `start` and `end`, both inclusive.
#[utoipa::path(
    get,
    path = "/rate/history",
    params(HistoryQuery),
    responses(
        (status = 200, body = [QuoteResponse]),
        (status = 400, body = ErrorBody, description = "Malformed or missing timestamp")
    )
)]
pub async fn rate_history(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HistoryQuery>,
) -> ApiResult<Json<Vec<QuoteResponse>>> {
    let start = parse_bound("start", query.start.as_deref())?;
    let end = parse_bound("end", query.end.as_deref())?;

    let quotes = state.rate_service.quote_history(start, end);
    Ok(Json(quotes.into_iter().map(QuoteResponse::from).collect()))
}

fn parse_bound(name: &str, raw: Option<&str>) -> ApiResult<DateTime<Utc>> {
    let raw = raw.ok_or_else(|| ApiError::BadRequest(format!("missing {name} parameter")))?;
    NaiveDateTime::parse_from_str(raw, HISTORY_TIMESTAMP_FORMAT)
        .map(|ts| ts.and_utc())
        .map_err(|e| {
            ApiError::BadRequest(format!(
                "invalid {name} timestamp {raw:?}, expected YYYY-MM-DDTHH:MM: {e}"
            ))
        })
}
