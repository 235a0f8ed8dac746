pub mod api;
pub mod services;
pub mod utils;
pub mod views;

use std::net::SocketAddr;
use std::sync::Arc;

use common::config::Settings;
use common::server::shutdown_signal;
use common::Result;
use tokio::net::TcpListener;
use tracing::info;

use api::AppState;
use services::FoodTruckClient;
use views::Renderer;

/// Serves the food truck finder UI until shutdown.
pub async fn run_web_server(settings: &Settings) -> Result<()> {
    let state = AppState {
        renderer: Arc::new(Renderer::new()?),
        source: Arc::new(FoodTruckClient::new(&settings.web)?),
    };
    info!(backend = %settings.web.backend_host, "UI ready");

    let addr = SocketAddr::from(([0, 0, 0, 0], settings.web.port));
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "UI listening");

    axum::serve(listener, api::routes(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("UI stopped");
    Ok(())
}
