mod health;
mod rates;

use std::sync::Arc;

use axum::{http::HeaderValue, routing::get, Json, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::warn;
use utoipa::OpenApi;

use crate::{config::Config, error::ErrorBody, main_lib::AppState, models::QuoteResponse};

pub use health::{healthz, readyz};
pub use rates::{latest_rate, rate_history};

#[derive(OpenApi)]
#[openapi(
    paths(health::healthz, health::readyz, rates::latest_rate, rates::rate_history),
    components(schemas(QuoteResponse, ErrorBody)),
    tags((name = "cambio"))
)]
pub struct ApiDoc;

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let openapi = ApiDoc::openapi();

    Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/rate/latest", get(latest_rate))
        .route("/rate/history", get(rate_history))
        .route("/openapi.json", get(|| async { Json(openapi) }))
        .with_state(state)
        .layer(cors_layer(&config.cors_allow))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(allowed: &[String]) -> CorsLayer {
    if allowed.iter().any(|o| o == "*") {
        return CorsLayer::new().allow_origin(Any);
    }

    let origins = allowed
        .iter()
        .filter_map(|o| match o.parse() {
            Ok(origin) => Some(origin),
            Err(_) => {
                warn!("Ignoring invalid CORS origin {:?}", o);
                None
            }
        })
        .collect::<Vec<HeaderValue>>();
    CorsLayer::new().allow_origin(origins)
}
