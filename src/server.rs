//! HTTP server initialization and runtime setup.
//!
//! Connects the database, applies migrations, spawns the click worker,
//! and runs the Axum server.

use crate::application::services::{LinkService, RedirectService, StatsService};
use crate::config::Config;
use crate::domain::click_worker::run_click_worker;
use crate::infrastructure::geo::{GeoResolver, IpApiResolver, NullGeoResolver};
use crate::infrastructure::persistence::{PgClickRepository, PgLinkRepository};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::Result;
use axum::extract::Request;
use axum::ServiceExt;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Runs the HTTP server with the given configuration.
///
/// # Errors
///
/// Returns an error if the database connection, migration run, or server
/// bind fails.
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .connect(&config.database_url)
        .await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations").run(&pool).await?;

    let pool = Arc::new(pool);
    let links = Arc::new(PgLinkRepository::new(pool.clone()));
    let clicks = Arc::new(PgClickRepository::new(pool.clone()));

    let geo: Arc<dyn GeoResolver> = match &config.geo_api_url {
        Some(url) => {
            tracing::info!("Geolocation enabled ({url})");
            Arc::new(IpApiResolver::new(url))
        }
        None => {
            tracing::info!("Geolocation disabled");
            Arc::new(NullGeoResolver)
        }
    };

    let (click_tx, click_rx) = mpsc::channel(config.click_queue_capacity);

    tokio::spawn(run_click_worker(
        click_rx,
        clicks.clone(),
        links.clone(),
        geo,
    ));
    tracing::info!("Click worker started");

    let state = AppState {
        link_service: Arc::new(LinkService::new(links.clone(), config.base_url.clone())),
        stats_service: Arc::new(StatsService::new(links.clone(), clicks)),
        redirect_service: Arc::new(RedirectService::new(links, click_tx.clone())),
        click_sender: click_tx,
        pages: config.pages.clone(),
    };

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");

    Ok(())
}

/// Completes when Ctrl+C (SIGINT) arrives, letting in-flight requests
/// finish before the server exits. Dropping the server also drops the
/// click senders, so the worker drains its queue and stops on its own.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal, shutting down");
        return;
    }

    tracing::info!("Shutdown signal received");
}
