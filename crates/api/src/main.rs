use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use workshop_api::config::{LogFormat, ServerConfig};
use workshop_api::router::build_app_router;
use workshop_api::state::AppState;
use workshop_events::bus::DEFAULT_CAPACITY;
use workshop_events::{TopicBus, TopicConsumer};

const DEFAULT_LOG_FILTER: &str = "workshop_api=debug,workshop_events=info,tower_http=debug";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Configuration ---
    let config = ServerConfig::from_env().context("Failed to load configuration")?;

    // --- Tracing ---
    init_tracing(config.log_format);
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Topics ---
    let topics = Arc::new(
        TopicBus::new(config.topics.iter().cloned(), DEFAULT_CAPACITY)
            .context("Failed to declare topics")?,
    );
    let consumer_cancel = CancellationToken::new();
    let mut consumer_handles = Vec::new();
    for topic in topics.topics() {
        let subscription = topics.subscribe(topic)?;
        consumer_handles.push(tokio::spawn(TopicConsumer::run(
            subscription,
            consumer_cancel.clone(),
        )));
    }
    tracing::info!(count = consumer_handles.len(), "Topic consumers started");

    // --- Store ---
    let config = Arc::new(config);
    let state = match &config.database_url {
        Some(url) => {
            let pool = workshop_db::create_pool(url)
                .await
                .context("Failed to connect to database")?;
            tracing::info!("Database connection pool created");

            workshop_db::health_check(&pool)
                .await
                .context("Database health check failed")?;
            workshop_db::run_migrations(&pool)
                .await
                .context("Failed to run database migrations")?;
            tracing::info!("Database migrations applied");

            AppState::postgres(Arc::clone(&config), pool, Arc::clone(&topics))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory store");
            AppState::in_memory(Arc::clone(&config), Arc::clone(&topics))
        }
    };

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let host = config
        .host
        .parse()
        .with_context(|| format!("Invalid HOST address '{}'", config.host))?;
    let addr = SocketAddr::new(host, config.port);
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    consumer_cancel.cancel();
    let grace = Duration::from_secs(config.shutdown_timeout_secs);
    for handle in consumer_handles {
        if tokio::time::timeout(grace, handle).await.is_err() {
            tracing::warn!("Topic consumer did not stop within the shutdown timeout");
        }
    }
    tracing::info!("Graceful shutdown complete");
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
    }
}

/// Wait for SIGINT (Ctrl-C) or SIGTERM to initiate graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
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
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
