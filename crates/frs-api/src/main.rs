//! # frs-api — Binary Entry Point
//!
//! Starts the Axum HTTP server. Binds to a configurable port (default
//! 8080); the rule backend is selected from the environment before the
//! listener comes up, so a misconfigured database fails fast.

use frs_api::state::{AppConfig, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    // Select and connect the rule backend (fixture by default, PostgreSQL
    // with DB_MODE=db).
    let source = frs_store::connect_from_env().await.map_err(|e| {
        tracing::error!("Rule source initialization failed: {e}");
        e
    })?;

    let state = AppState::with_config(source, AppConfig { port });
    let app = frs_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("FRS API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
