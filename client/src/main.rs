//! # Nuru Client
//!
//! Loads configuration, connects to the canisters, loads the public
//! collections and optionally signs in as `NURU_PRINCIPAL`.

use nuru_client::{debug, AppStore, ClientConfig};
use shared::{truncate_principal, Principal};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let _log_guard = debug::init();

    let config = ClientConfig::from_env()?;
    tracing::info!(
        network = %config.network,
        host = %config.host,
        "Starting Nuru client"
    );

    let store = AppStore::from_config(&config)?;
    store.init().await;

    let state = store.snapshot();
    tracing::info!(
        pools = state.pools.len(),
        proposals = state.proposals.len(),
        strategies = state.strategies.len(),
        "Public collections loaded"
    );

    if let Ok(principal) = std::env::var("NURU_PRINCIPAL") {
        let principal = Principal::new(principal);
        let phase = store.sign_in(principal.clone()).await?;
        let session = store.session();
        tracing::info!(
            principal = %truncate_principal(principal.as_str()),
            phase = %phase,
            balance = session.balance,
            positions = session.positions.len(),
            "Signed in"
        );
    }

    store.shutdown();
    Ok(())
}
