use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mechacrew_api::background::presence_sweep;
use mechacrew_api::config::ServerConfig;
use mechacrew_api::router::build_app_router;
use mechacrew_api::state::AppState;
use mechacrew_api::store::presence::PresenceRoster;
use mechacrew_api::store::voting::VotingStore;
use mechacrew_generate::client::GrokClient;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mechacrew_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database (optional collaborator) ---
    let pool = match std::env::var("DATABASE_URL") {
        Ok(database_url) => {
            let pool = mechacrew_db::create_pool(&database_url)
                .await
                .expect("Failed to connect to database");
            tracing::info!("Database connection pool created");

            mechacrew_db::health_check(&pool)
                .await
                .expect("Database health check failed");

            mechacrew_db::run_migrations(&pool)
                .await
                .expect("Failed to run database migrations");
            tracing::info!("Database migrations applied");

            Some(pool)
        }
        Err(_) => {
            tracing::warn!(
                "DATABASE_URL not set, running without persistence (sessions, chat and \
                 component mirroring unavailable)"
            );
            None
        }
    };

    // --- Generation collaborator (optional) ---
    let generator = match std::env::var("XAI_API_KEY") {
        Ok(api_key) if !api_key.is_empty() => {
            tracing::info!("Generation client configured");
            Some(Arc::new(GrokClient::new(api_key)))
        }
        _ => {
            tracing::warn!("XAI_API_KEY not set, generation will serve fallback components");
            None
        }
    };

    // --- In-memory stores ---
    let voting = Arc::new(VotingStore::new());
    let presence = Arc::new(PresenceRoster::new());

    // --- Background presence sweep ---
    let sweep_cancel = tokio_util::sync::CancellationToken::new();
    let sweep_handle = tokio::spawn(presence_sweep::run(
        Arc::clone(&presence),
        sweep_cancel.clone(),
    ));

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        voting,
        presence,
        generator,
    };

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    sweep_cancel.cancel();
    let _ = tokio::time::timeout(Duration::from_secs(5), sweep_handle).await;
    tracing::info!("Presence sweep stopped");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager (e.g. systemd, Docker, Kubernetes).
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
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
