use std::sync::Arc;

use log::info;
use tokio::net::TcpListener;
use workalloc::{api::build_router, config, state::AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = config::AppConfig::from_env()?;
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting application with config:");
    info!("  Host: {}", config.host);
    info!("  Port: {}", config.port);
    info!("  Body limit: {} bytes", config.body_limit_bytes);
    info!(
        "  Balance thresholds: overload x{}, underload x{}, ceiling x{}",
        config.thresholds.overload_factor,
        config.thresholds.underload_factor,
        config.thresholds.target_ceiling_factor
    );

    let bind_address = format!("{}:{}", config.host, config.port);
    let app = build_router(Arc::new(AppState::new(config)));

    let listener = TcpListener::bind(&bind_address).await?;
    info!("Server starting on http://{}", bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
