use std::net::SocketAddr;

use dotenvy::dotenv;
use tracing::info;

use spark_api::bootstrap::app_context::{AppContext, AppServices};
use spark_api::bootstrap::config::Config;
use spark_api::presentation::router::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "spark_api=debug,axum=info,tower_http=info".into()),
        )
        .init();

    let cfg = Config::from_env()?;
    info!(?cfg, "Starting document service");

    let services = AppServices::from_config(&cfg).await?;
    let ctx = AppContext::new(cfg.clone(), services);
    ctx.seed_demo_user().await?;

    let app = build_router(ctx);

    let api_addr = SocketAddr::from(([0, 0, 0, 0], cfg.api_port));
    info!(%api_addr, "HTTP API listening");
    let listener = tokio::net::TcpListener::bind(api_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("HTTP API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = ?e, "failed to listen for shutdown signal");
    }
}
