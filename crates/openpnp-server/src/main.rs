//! openpnp server
//!
//! - PnP endpoints: /pnp/HELLO, /pnp/WORK-REQUEST, /pnp/WORK-RESPONSE
//! - Built-in inventory handler (device-info, then backoff)
//! - Config path: first argument, default `openpnp.yaml`

use tracing_subscriber::{fmt, EnvFilter};

use openpnp_server::{app_state, config, router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let path = std::env::args().nth(1).unwrap_or_else(|| "openpnp.yaml".into());
    let cfg = config::load_from_file(&path)?;
    let listen = cfg.server.listen_addr()?;

    let state = app_state::AppState::with_inventory(cfg);
    let app = router::build_router(state);

    tracing::info!(%listen, config = %path, "openpnp-server starting");
    let listener = tokio::net::TcpListener::bind(listen).await?;

    axum::serve(listener, app).await?;
    Ok(())
}
