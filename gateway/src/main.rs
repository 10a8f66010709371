use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use gateway::{AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gateway=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    info!(port = config.port, public_url = %config.public_url, "gateway starting");

    let state = Arc::new(AppState::from_config(&config).await?);
    info!(store = state.store.kind(), "blob store ready");

    match &config.frontend_dist {
        Some(path) => info!(path = %path, "serving designer assets from"),
        None => info!("no designer build found; serving API only"),
    }

    let app = gateway::app(&config, state);

    let addr = format!("0.0.0.0:{}", config.port);
    info!("listening on {addr}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
