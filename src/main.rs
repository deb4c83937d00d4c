// Main entry point - Dependency injection and shell setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};
use tracing_subscriber::EnvFilter;

use crate::application::action_registry::{ActionRegistry, Shell};
use crate::application::dashboard_widget::BankingDashboard;
use crate::infrastructure::chartjs_backend::ChartJsBackend;
use crate::infrastructure::config::load_dashboard_config;
use crate::infrastructure::headless_page::HeadlessPage;
use crate::infrastructure::rpc_source::RpcDashboardSource;
use crate::presentation::app_state::AppState;
use crate::presentation::router::router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_dashboard_config()?;

    // Adapters (infrastructure layer)
    let source = Arc::new(RpcDashboardSource::new(&config.backend)?);
    let backend = Arc::new(ChartJsBackend::new());
    let page = Arc::new(HeadlessPage::from_config(&config.page));

    // Register client actions (application layer)
    let mut registry = ActionRegistry::new();
    registry.register(
        &config.widget.action_key,
        Arc::new(BankingDashboard::new(source, backend, page.clone(), &config)),
    )?;

    let state = Arc::new(AppState {
        shell: Shell::new(registry),
        page,
    });

    for key in &config.server.open_on_start {
        if let Err(e) = state.shell.open(key).await {
            tracing::warn!("Could not open {} on start: {}", key, e);
        }
    }

    // Start server
    let addr: SocketAddr = config.server.bind.parse()?;
    tracing::info!("Starting banking-dashboard shell on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router(state.clone()))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Stop every loop and release every chart before exiting
    state.shell.close_all().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutting down");
}
