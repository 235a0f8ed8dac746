pub mod api;
pub mod ingest;
pub mod services;


use std::sync::Arc;
use common::config::Settings;
use common::server::shutdown_signal;
use common::Result;
use services::CatalogService;
use tokio::net::TcpListener;
use std::net::SocketAddr;
use tracing::info;

/// Loads the permit dataset and serves `/foodtrucks` until shutdown.
pub async fn run_catalog_server(settings: &Settings) -> Result<()> {
    let service = Arc::new(CatalogService::from_settings(&settings.catalog)?);
    info!(records = service.len(), "Catalog ready");

    let api_router = api::routes(Arc::clone(&service), &settings.catalog.origins());

    let addr = SocketAddr::from(([0, 0, 0, 0], settings.catalog.port));
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "Catalog API listening");

    axum::serve(listener, api_router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Catalog API stopped");
    Ok(())
}
