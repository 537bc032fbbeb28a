// Dashboard server entry point
//
// Usage: cargo run --bin dashboard
// Reads play_by_play_{season}.parquet (or .csv) files from DATA_DIR.

use gridiron_explorer::{create_router, AppState, ServerConfig};
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing (structured logging)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    // Default log level: info for our crate, warn for others
                    "gridiron_explorer=info,tower_http=debug,axum=debug,warn".into()
                }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting dashboard server...");

    let config = ServerConfig::from_env()?;

    tracing::info!("Configuration:");
    tracing::info!("  DATA_DIR: {}", config.data_dir.display());
    tracing::info!("  PORT: {}", config.port);
    tracing::info!("  SEASONS: {}-{}", config.first_season, config.latest_season);
    tracing::info!("  CACHE: {} scopes, TTL {:?}", config.cache_capacity, config.cache_ttl);
    tracing::info!("  MIN_QB_ATTEMPTS: {}", config.min_qb_attempts);

    let port = config.port;
    let state = AppState::new(config);
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .await?;

    Ok(())
}
