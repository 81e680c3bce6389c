//! HTTP server initialization and runtime setup.
//!
//! Handles store selection, access-log worker spawning, and Axum server lifecycle.

use crate::config::{AccessLogTarget, Config};
use crate::domain::access_worker::run_access_worker;
use crate::domain::repositories::{AccessLogSink, LinkStore};
use crate::infrastructure::access_log::{DEFAULT_ACCESS_LOG_KEY, RedisAccessLog, TracingAccessLog};
use crate::infrastructure::store::{CachedLinkStore, MemoryLinkStore, RedisLinkStore};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use redis::aio::ConnectionManager;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Newest events kept in the Redis access-log list.
const REDIS_ACCESS_LOG_MAX_LEN: usize = 100_000;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Link store (Redis, or in-memory seeded from `LINKS_FILE`)
/// - Access-log sink and background worker
/// - Prometheus metrics recorder
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Redis is configured but unreachable
/// - The links file cannot be loaded
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let (store, redis) = build_store(&config).await?;
    let sink = build_sink(&config, redis)?;

    let (access_tx, access_rx) = mpsc::channel(config.access_log_queue_capacity);
    let worker = tokio::spawn(run_access_worker(access_rx, sink));
    tracing::info!("Access log worker started");

    let addr: SocketAddr = config.listen_addr.parse()?;

    let metrics = install_metrics_recorder()?;
    let state = AppState::new(config, store, access_tx).with_metrics(metrics);
    let app = app_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    // The router (and with it the last sender) is gone; drain what is queued.
    if let Err(e) = worker.await {
        tracing::warn!("Access log worker ended abnormally: {}", e);
    }

    tracing::info!("Server stopped");
    Ok(())
}

/// Installs the global Prometheus recorder behind the `metrics` facade.
fn install_metrics_recorder() -> Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .context("Failed to install Prometheus recorder")?;
    tracing::info!("Metrics recorder installed, exposed at /metrics");
    Ok(handle)
}

/// Picks the link store backend.
///
/// Redis is used whenever it is configured; a failed connection is fatal
/// because every lookup would fail anyway.
async fn build_store(
    config: &Config,
) -> Result<(Arc<dyn LinkStore>, Option<ConnectionManager>)> {
    if let Some(redis_url) = &config.redis_url {
        let store = RedisLinkStore::connect(redis_url)
            .await
            .context("Failed to connect to Redis link store")?;
        let connection = store.connection();
        tracing::info!("Link store: Redis (read cache {}s)", config.link_cache_ttl_seconds);
        let cached = CachedLinkStore::new(Arc::new(store));
        return Ok((Arc::new(cached), Some(connection)));
    }

    let store = match &config.links_file {
        Some(path) => MemoryLinkStore::from_json_file(path)?,
        None => MemoryLinkStore::new(),
    };

    if store.is_empty() {
        tracing::warn!("Link store: memory, no links loaded");
    } else {
        tracing::info!("Link store: memory ({} links)", store.len());
    }

    Ok((Arc::new(store), None))
}

fn build_sink(
    config: &Config,
    redis: Option<ConnectionManager>,
) -> Result<Arc<dyn AccessLogSink>> {
    match (config.access_log_target, redis) {
        (AccessLogTarget::Tracing, _) => {
            tracing::info!("Access log sink: tracing");
            Ok(Arc::new(TracingAccessLog))
        }
        (AccessLogTarget::Redis, Some(connection)) => {
            tracing::info!("Access log sink: Redis list '{}'", DEFAULT_ACCESS_LOG_KEY);
            Ok(Arc::new(RedisAccessLog::new(
                connection,
                DEFAULT_ACCESS_LOG_KEY,
                REDIS_ACCESS_LOG_MAX_LEN,
            )))
        }
        (AccessLogTarget::Redis, None) => {
            anyhow::bail!("ACCESS_LOG_SINK=redis requires a Redis link store")
        }
    }
}

/// Resolves on Ctrl+C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
