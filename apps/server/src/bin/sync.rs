//! One-shot quote refresh: fetch the latest quote once, store it, exit.
//! Meant for cron jobs and scheduled functions.

use cambio_server::{build_state, config::Config, init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_tracing();
    let state = build_state(&config).await?;

    let quote = state.rate_service.fetch_latest_quote().await;
    tracing::info!(
        "Quote refresh finished: {}{} {} at {}",
        quote.origin,
        quote.destination,
        quote.value,
        quote.timestamp
    );
    Ok(())
}
