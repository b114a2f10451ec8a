use std::sync::Arc;
use std::time::Duration;

use sanchara_core::config::AppConfig;
use sanchara_core::db;
use sanchara_core::hub::AlertHub;
use sanchara_core::kafka;
use sanchara_core::processor::ReportProcessor;
use sanchara_core::routing::RouteEngine;
use sanchara_core::store::pg::{PgAlertStore, PgBarrierStore, PgLocationStore, PgRouteStore};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load config
    let config = AppConfig::load()?;

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(&config.log_level)
        .init();

    info!("Starting Sanchara core service...");

    // Init DB
    let pool = db::init_pool(&config.database_url).await?;
    info!("Connected to database");

    let locations = Arc::new(PgLocationStore::new(pool.clone()));
    let barriers = Arc::new(PgBarrierStore::new(pool.clone()));
    let alerts = Arc::new(PgAlertStore::new(pool.clone()));
    let routes = Arc::new(PgRouteStore::new(pool));

    // The hub is owned here and injected; subscriber transports attach via
    // the gateway.
    let hub = Arc::new(AlertHub::new(
        config.alert_channel_capacity,
        Duration::from_millis(config.alert_send_timeout_ms),
    ));

    let engine = RouteEngine::new(barriers.clone(), routes, config.route_corridor_m);
    let processor = Arc::new(ReportProcessor::new(
        locations, barriers, alerts, engine, hub, None,
    ));

    // Consume reports until shutdown
    kafka::start_consumer(&config, processor).await?;

    Ok(())
}
