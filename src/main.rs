use anyhow::{bail, Context, Result};
use lumen::api::{create_router, AppState};
use lumen::bridge::HueClient;
use lumen::config::{self, LumenConfig};
use lumen::controller::LightController;
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lumen=info".into()),
        )
        .init();

    let config_path =
        std::env::var("LUMEN_CONFIG").unwrap_or_else(|_| "lumen.toml".to_string());
    let config = if std::path::Path::new(&config_path).exists() {
        config::load_config(&config_path)
            .map_err(|e| anyhow::anyhow!("Failed to load config from {}: {}", config_path, e))?
    } else {
        LumenConfig::default()
    };

    if config.bridge.host.is_empty() {
        bail!("No bridge host configured (set bridge.host or HUE_BRIDGE_HOST)");
    }
    if config.light.target_id.is_empty() {
        warn!(
            "No target light configured (set light.target_id or {}); \
             requests will fail to resolve",
            config::TARGET_LIGHT_ENV
        );
    }

    info!(bridge_host = %config.bridge.host, "Lumen starting...");

    let gateway =
        Arc::new(HueClient::new(&config.bridge).context("Failed to construct bridge client")?);
    let controller = Arc::new(LightController::new(
        gateway,
        config.light.target_id.clone(),
    ));

    let app = create_router(AppState { controller });

    let listener = tokio::net::TcpListener::bind(&config.server.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.server.bind_addr))?;
    info!("HTTP server listening on {}", config.server.bind_addr);

    axum::serve(listener, app)
        .await
        .context("HTTP server error")?;

    Ok(())
}
