use std::{net::SocketAddr, path::PathBuf, time::Duration};

use anyhow::Context;
use cambio_core::secrets::FIXER_SECRET_ID;
use cambio_market_data::DEFAULT_FIXER_URL;

const UPSTREAM_TIMEOUT_MARGIN: Duration = Duration::from_secs(5);

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    /// Client timeout for the FX API call. Always shorter than
    /// `request_timeout` so a hung upstream still yields the fallback quote.
    pub upstream_timeout: Duration,
    /// Defaults to `secrets.json` next to the database when unset.
    pub secret_file: Option<PathBuf>,
    pub secret_key: String,
    pub fixer_url: String,
    pub fixer_secret_id: String,
    /// Written into the secret store at startup when present.
    pub fixer_api_key: Option<String>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = env_or("CAMBIO_LISTEN_ADDR", "0.0.0.0:8080")
            .parse()
            .context("Invalid CAMBIO_LISTEN_ADDR")?;
        let db_path = env_or("CAMBIO_DB_PATH", "./db/app.db");
        let cors_allow = env_or("CAMBIO_CORS_ALLOW_ORIGINS", "*")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = env_or("CAMBIO_REQUEST_TIMEOUT_MS", "30000")
            .parse()
            .unwrap_or(30000);
        let request_timeout = Duration::from_millis(timeout_ms);
        let upstream_timeout = match non_empty_env("CAMBIO_UPSTREAM_TIMEOUT_MS") {
            Some(raw) => Duration::from_millis(
                raw.parse()
                    .context("Invalid CAMBIO_UPSTREAM_TIMEOUT_MS")?,
            ),
            None => default_upstream_timeout(request_timeout),
        };
        let secret_file = non_empty_env("CAMBIO_SECRET_FILE").map(PathBuf::from);
        let secret_key = std::env::var("CAMBIO_SECRET_KEY").unwrap_or_default();
        let fixer_url = env_or("CAMBIO_FIXER_URL", DEFAULT_FIXER_URL);
        let fixer_secret_id = env_or("CAMBIO_FIXER_SECRET_ID", FIXER_SECRET_ID);
        let fixer_api_key = non_empty_env("CAMBIO_FIXER_API_KEY");

        let config = Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout,
            upstream_timeout,
            secret_file,
            secret_key,
            fixer_url,
            fixer_secret_id,
            fixer_api_key,
        };
        config.validate()?;
        Ok(config)
    }

    /// Rejects settings under which `/rate/latest` could time out before the
    /// FX call gives up.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.upstream_timeout.is_zero() {
            anyhow::bail!("CAMBIO_UPSTREAM_TIMEOUT_MS must be greater than zero");
        }
        if self.upstream_timeout >= self.request_timeout {
            anyhow::bail!(
                "CAMBIO_UPSTREAM_TIMEOUT_MS ({} ms) must be shorter than CAMBIO_REQUEST_TIMEOUT_MS ({} ms)",
                self.upstream_timeout.as_millis(),
                self.request_timeout.as_millis()
            );
        }
        Ok(())
    }
}

/// Leaves `UPSTREAM_TIMEOUT_MARGIN` for the rest of the request, or a fifth of
/// the request timeout when that is shorter.
fn default_upstream_timeout(request_timeout: Duration) -> Duration {
    let margin = UPSTREAM_TIMEOUT_MARGIN.min(request_timeout / 5);
    request_timeout.saturating_sub(margin)
}

fn env_or(key: &str, default: &str) -> String {
    non_empty_env(key).unwrap_or_else(|| default.to_string())
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
