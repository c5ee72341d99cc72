use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use cambio_core::{
    errors::{DatabaseError, Error},
    quotes::{Quote, QuoteStore},
    rates::RateService,
    secrets::SecretProvider,
    Result,
};
use cambio_market_data::ReqwestTransport;
use cambio_server::{api::app_router, config::Config, secrets::FileSecretStore, AppState};
use chrono::{DateTime, TimeZone, Utc};
use rust_decimal_macros::dec;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

struct NoKey;

impl SecretProvider for NoKey {
    fn get_api_key(&self) -> String {
        String::new()
    }
}

#[derive(Default)]
struct MemoryStore {
    quotes: Mutex<Vec<Quote>>,
    puts: Mutex<usize>,
    fail_on_scan: bool,
}

#[async_trait]
impl QuoteStore for MemoryStore {
    async fn put(&self, quote: &Quote) -> Result<()> {
        *self.puts.lock().unwrap() += 1;
        self.quotes.lock().unwrap().push(quote.clone());
        Ok(())
    }

    fn scan_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<Quote>> {
        if self.fail_on_scan {
            return Err(Error::Database(DatabaseError::QueryFailed(
                "disk I/O error".to_string(),
            )));
        }
        let mut found: Vec<Quote> = self
            .quotes
            .lock()
            .unwrap()
            .iter()
            .filter(|q| q.timestamp >= start && q.timestamp <= end)
            .cloned()
            .collect();
        found.sort_by_key(|q| q.timestamp);
        Ok(found)
    }

    fn ping(&self) -> Result<()> {
        if self.fail_on_scan {
            return Err(Error::Database(DatabaseError::ConnectionFailed(
                "unable to open database file".to_string(),
            )));
        }
        Ok(())
    }
}

fn test_config(dir: &TempDir) -> Config {
    Config {
        listen_addr: "127.0.0.1:0".parse().unwrap(),
        db_path: dir.path().join("app.db").to_string_lossy().to_string(),
        cors_allow: vec!["*".to_string()],
        request_timeout: Duration::from_secs(5),
        upstream_timeout: Duration::from_secs(2),
        secret_file: Some(dir.path().join("secrets.json")),
        secret_key: String::new(),
        fixer_url: "http://127.0.0.1:9/fixer/latest".to_string(),
        fixer_secret_id: "fixer-api-key-dev".to_string(),
        fixer_api_key: None,
    }
}

fn router_with_store(dir: &TempDir, store: Arc<MemoryStore>) -> Router {
    let config = test_config(dir);
    let rate_service = RateService::new(Arc::new(NoKey), Arc::new(ReqwestTransport::default()), store);
    let secret_store = FileSecretStore::new(dir.path().join("secrets.json"), None).unwrap();
    let state = Arc::new(AppState {
        rate_service: Arc::new(rate_service),
        secret_store: Arc::new(secret_store),
    });
    app_router(state, &config)
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

fn stored(hour: u32, value: rust_decimal::Decimal) -> Quote {
    Quote::new("BRL", value, Utc.with_ymd_and_hms(2025, 4, 10, hour, 0, 0).unwrap()).unwrap()
}

#[tokio::test]
async fn latest_without_api_key_serves_fallback() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(MemoryStore::default());
    let app = router_with_store(&dir, store.clone());

    let (status, body) = get(app, "/rate/latest").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["origin"], "BRL");
    assert_eq!(body["destination"], "USD");
    assert_eq!(body["value"].as_f64(), Some(5.0));
    assert!(body["timestamp"].is_string());
    assert_eq!(*store.puts.lock().unwrap(), 0);
}

#[tokio::test]
async fn history_returns_quotes_within_range() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(MemoryStore::default());
    store.quotes.lock().unwrap().extend([
        stored(14, dec!(0.19)),
        stored(9, dec!(0.17)),
        stored(12, dec!(0.18)),
    ]);
    let app = router_with_store(&dir, store);

    let (status, body) =
        get(app, "/rate/history?start=2025-04-10T09:00&end=2025-04-10T12:00").await;
    assert_eq!(status, StatusCode::OK);
    let values: Vec<f64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|q| q["value"].as_f64().unwrap())
        .collect();
    assert_eq!(values.len(), 2);
    assert!((values[0] - 0.17).abs() < 1e-9);
    assert!((values[1] - 0.18).abs() < 1e-9);
}

#[tokio::test]
async fn history_on_empty_store_is_empty_array() {
    let dir = tempfile::tempdir().unwrap();
    let app = router_with_store(&dir, Arc::new(MemoryStore::default()));

    let (status, body) =
        get(app, "/rate/history?start=2025-04-01T00:00&end=2025-04-30T23:59").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Array(vec![]));
}

#[tokio::test]
async fn history_read_failure_is_empty_array() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(MemoryStore {
        fail_on_scan: true,
        ..Default::default()
    });
    let app = router_with_store(&dir, store);

    let (status, body) =
        get(app, "/rate/history?start=2025-04-01T00:00&end=2025-04-30T23:59").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Array(vec![]));
}

#[tokio::test]
async fn history_rejects_bad_timestamps() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(MemoryStore::default());

    for uri in [
        "/rate/history?start=invalid&end=2025-01-10",
        "/rate/history?start=2025-01-01&end=2025-01-10",
        "/rate/history?start=2025-01-01T00:00&end=2025-01-10",
        "/rate/history?start=2025-01-01T00:00",
        "/rate/history",
    ] {
        let (status, body) = get(router_with_store(&dir, store.clone()), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert!(body["error"].as_str().is_some_and(|m| !m.is_empty()), "{uri}");
    }
}

#[tokio::test]
async fn health_and_openapi_routes() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(MemoryStore::default());

    for uri in ["/healthz", "/readyz"] {
        let response = router_with_store(&dir, store.clone())
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"ok");
    }

    let (status, doc) = get(router_with_store(&dir, store), "/openapi.json").await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"].get("/rate/latest").is_some());
    assert!(doc["paths"].get("/rate/history").is_some());
}

#[tokio::test]
async fn readyz_reports_unreachable_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(MemoryStore {
        fail_on_scan: true,
        ..Default::default()
    });

    let (status, body) = get(router_with_store(&dir, store.clone()), "/readyz").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body["error"]
        .as_str()
        .is_some_and(|m| m.contains("unable to open database file")));

    let response = router_with_store(&dir, store)
        .oneshot(Request::builder().uri("/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
