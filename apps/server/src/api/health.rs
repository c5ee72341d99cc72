use std::sync::Arc;

use axum::extract::State;

use crate::{
    error::{ApiError, ApiResult, ErrorBody},
    main_lib::AppState,
};

#[utoipa::path(get, path = "/healthz", responses((status = 200, description = "Health")))]
pub async fn healthz() -> &'static str {
    "ok"
}

/// Ready once the quote store answers.
#[utoipa::path(
    get,
    path = "/readyz",
    responses(
        (status = 200, description = "Ready"),
        (status = 503, description = "Quote store unreachable", body = ErrorBody)
    )
)]
pub async fn readyz(State(state): State<Arc<AppState>>) -> ApiResult<&'static str> {
    state
        .rate_service
        .check_ready()
        .map_err(|e| ApiError::Unavailable(format!("quote store unavailable: {e}")))?;
    Ok("ok")
}
