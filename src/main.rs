/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/
use std::sync::Arc;

use anyhow::{Context, Result};
use gps_tracker_api::application::services::location_service::LocationService;
use gps_tracker_api::config::Config;
use gps_tracker_api::constants::{SERVICE_NAME, SERVICE_VERSION};
use gps_tracker_api::presentation::server::start_server;
use gps_tracker_api::session::session::HttpSessionClientFactory;
use gps_tracker_api::utils::logger::setup_logger;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    setup_logger();

    let config = Config::new();
    info!("Starting {} v{}", SERVICE_NAME, SERVICE_VERSION);
    info!("Loaded config: {}", config);

    let factory = HttpSessionClientFactory::new(Arc::new(config.tracker.clone()));
    let service = Arc::new(LocationService::new(factory));

    start_server(&config.server, service)
        .await
        .context("Server terminated with an error")?;

    Ok(())
}
