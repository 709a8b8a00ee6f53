use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use meridian_api::background;
use meridian_api::config::{ServerConfig, StorageConfig};
use meridian_api::router::build_app_router;
use meridian_api::state::AppState;
use meridian_api::storage::local::LocalStore;
use meridian_api::storage::s3::S3Store;
use meridian_api::storage::ObjectStore;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "meridian_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Configuration loaded");

    // Refuse to start without a working, migrated database; a server that
    // comes up half-broken is worse than one that restarts.
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = meridian_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    meridian_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    meridian_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database ready, migrations applied");

    let store: Arc<dyn ObjectStore> = match &config.storage {
        StorageConfig::Local {
            upload_root,
            public_base,
        } => {
            tracing::info!(root = %upload_root.display(), "Storing uploads on local disk");
            Arc::new(LocalStore::new(upload_root.clone(), public_base.clone()))
        }
        StorageConfig::S3 {
            bucket,
            key_prefix,
            public_base,
        } => {
            tracing::info!(bucket = %bucket, "Storing uploads in S3");
            Arc::new(
                S3Store::from_env(bucket.clone(), key_prefix.clone(), public_base.clone()).await,
            )
        }
    };

    // Periodic cleanup of dead sessions and aged view marks.
    let maintenance_cancel = tokio_util::sync::CancellationToken::new();
    let maintenance_handle = tokio::spawn(background::maintenance::run(
        pool.clone(),
        maintenance_cancel.clone(),
    ));

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        store,
    };
    let app = build_app_router(state, &config);

    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");
    tracing::info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // In-flight requests have drained; wind down the background task.
    maintenance_cancel.cancel();
    let _ = tokio::time::timeout(Duration::from_secs(5), maintenance_handle).await;
    tracing::info!("Shutdown complete");
}

/// Resolve when the process is told to stop: SIGINT from a terminal or
/// SIGTERM from a process manager.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("SIGINT received, draining"),
        () = terminate => tracing::info!("SIGTERM received, draining"),
    }
}
