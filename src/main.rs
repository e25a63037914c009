use std::sync::Arc;

use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use updater_web::config::Config;
use updater_web::provider::HttpDataProvider;
use updater_web::router::{UpdaterState, updater_router};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let config = Arc::new(Config::from_env()?);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        version = %config.display_version(),
        upstream_url = %config.upstream_url,
        download_base_url = %config.download_base_url,
        cache_type = %config.cache_type,
        cache_default_timeout = config.cache_default_timeout
    );
    info!(
        devices_json = %config.devices_json_path.display(),
        devices_local_json = %config.devices_local_json_path.display(),
        device_deps = %config.device_deps_path.display(),
        build_targets = %config.lineage_build_targets_path.display(),
        "local data files take precedence over the official URLs"
    );

    let provider = Arc::new(HttpDataProvider::new(config.clone()));
    let state = UpdaterState::new(config, provider);
    let app = updater_router(state);

    let addr = "0.0.0.0:8000";
    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to install ctrl-c handler");
    }
}
