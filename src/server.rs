//! HTTP server initialization and runtime setup.
//!
//! Handles the database pool, migrations, service wiring and the Axum server
//! lifecycle including graceful shutdown.

use crate::application::services::{AuthService, LinkService, SessionAuthenticator};
use crate::config::Config;
use crate::domain::clock::{Clock, SystemClock};
use crate::infrastructure::persistence::{
    PgAccountRepository, PgLinkRepository, PgSessionRepository,
};
use crate::routes::app_router;
use crate::state::{AppState, HttpSettings};
use crate::utils::password::PasswordHasher;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Opens the PostgreSQL pool using the configured pool limits.
///
/// # Errors
///
/// Returns an error if the database cannot be reached.
pub async fn connect_pool(config: &Config) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")
}

/// Builds services over `pool` and returns the shared handler state.
pub fn build_state(pool: PgPool, config: &Config) -> AppState {
    let pool = Arc::new(pool);
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let accounts = Arc::new(PgAccountRepository::new(pool.clone()));
    let sessions = Arc::new(PgSessionRepository::new(pool.clone()));
    let links = Arc::new(PgLinkRepository::new(pool));

    // Capped at config::MAX_SESSION_TTL_SECONDS by Config::validate.
    let session_ttl = chrono::Duration::seconds(config.session_ttl_seconds as i64);

    let auth_service = AuthService::new(
        accounts,
        sessions.clone(),
        PasswordHasher::default(),
        clock.clone(),
        session_ttl,
    );
    let authenticator = SessionAuthenticator::new(sessions, clock.clone());
    let link_service = LinkService::new(links, clock, &config.base_url);

    AppState::new(
        Arc::new(auth_service),
        Arc::new(link_service),
        Arc::new(authenticator),
        HttpSettings {
            session_ttl,
            cookie_secure: config.cookie_secure,
            auth_timeout: Duration::from_secs(config.auth_timeout_seconds),
            link_timeout: Duration::from_secs(config.link_timeout_seconds),
        },
    )
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Apply migrations
/// - Services and router
/// - Axum HTTP server, stopped by SIGINT or SIGTERM
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = connect_pool(&config).await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to apply migrations")?;
    tracing::info!("Migrations applied");

    let state = build_state(pool.clone(), &config);
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

    pool.close().await;
    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
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
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
