use std::path::Path;
use std::sync::Arc;

use crate::{config::Config, secrets::FileSecretStore};
use cambio_core::{
    rates::{RateService, RateServiceTrait},
    secrets::{SecretStore, StoredApiKeyProvider},
};
use cambio_market_data::ReqwestTransport;
use cambio_storage_sqlite::{db, QuoteRepository};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub rate_service: Arc<dyn RateServiceTrait>,
    pub secret_store: Arc<dyn SecretStore>,
}

pub fn init_tracing() {
    let log_format = std::env::var("CAMBIO_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    // try_init: the one-shot binary and tests may initialise more than once.
    let _ = if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .try_init()
    };
}

/// Opens the database, secret store and collaborators. Must run inside a
/// Tokio runtime because it starts the SQLite writer task.
pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    config.validate()?;
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let secret_path = config.secret_file.clone().unwrap_or_else(|| {
        Path::new(&db_path)
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join("secrets.json")
    });
    let file_store = FileSecretStore::new(secret_path.clone(), Some(config.secret_key.as_str()))?;
    tracing::info!(
        "Secret store at {} (encrypted: {})",
        secret_path.display(),
        file_store.is_encrypted()
    );
    let secret_store: Arc<dyn SecretStore> = Arc::new(file_store);

    let key_provider = StoredApiKeyProvider::new(secret_store.clone(), config.fixer_secret_id.clone());
    if let Some(api_key) = &config.fixer_api_key {
        key_provider.store_api_key(api_key)?;
        tracing::info!("Seeded secret {} from CAMBIO_FIXER_API_KEY", config.fixer_secret_id);
    }

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = db::spawn_writer(pool.clone());
    let quote_store = Arc::new(QuoteRepository::new(pool, writer));

    let transport = ReqwestTransport::new(config.upstream_timeout)?;
    let rate_service = RateService::new(Arc::new(key_provider), Arc::new(transport), quote_store)
    .with_endpoint(config.fixer_url.clone());

    Ok(Arc::new(AppState {
        rate_service: Arc::new(rate_service),
        secret_store,
    }))
}
