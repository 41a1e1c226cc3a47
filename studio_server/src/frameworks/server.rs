// Framework bootstrap for the studio API.

use crate::frameworks::{config, db, seed};
use crate::interface_adapters::postgres::{PostgresSessions, PostgresTeachers, PostgresUsers};
use crate::interface_adapters::routes::app;
use crate::interface_adapters::state::AppState;

use std::io::{Error, Result};
use std::net::SocketAddr;

fn init_runtime() {
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

// Serve the API on an already bound listener with the given state.
pub async fn serve(listener: tokio::net::TcpListener, state: AppState) -> Result<()> {
    let address = listener.local_addr()?;
    tracing::info!(%address, "listening");

    axum::serve(listener, app(state)).await.inspect_err(|e| {
        tracing::error!(error = %e, "server error");
    })
}

pub async fn run(listener: tokio::net::TcpListener) -> Result<()> {
    let state = build_state().await?;
    serve(listener, state).await
}

pub async fn run_with_config() -> Result<()> {
    init_runtime();

    let address = SocketAddr::from(([0, 0, 0, 0], config::http_port()));

    let listener = tokio::net::TcpListener::bind(address)
        .await
        .inspect_err(|e| {
            tracing::error!(%address, error = %e, "failed to bind");
        })?;

    run(listener).await
}

async fn build_state() -> Result<AppState> {
    let token_ttl = config::token_ttl_seconds();

    let state = match config::database_url() {
        Some(database_url) => {
            let pool = db::connect_pool(&database_url)
                .await
                .map_err(|e| Error::other(format!("failed to connect to database: {e}")))?;
            db::run_migrations(&pool)
                .await
                .map_err(|e| Error::other(format!("failed to run migrations: {e}")))?;
            tracing::info!("using postgres repositories");

            AppState::with_repositories(
                PostgresUsers { db: pool.clone() },
                PostgresTeachers { db: pool.clone() },
                PostgresSessions { db: pool },
            )
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory repositories");
            let state = AppState::in_memory();
            if config::seed_demo_data() {
                seed::seed_demo_data(&state).await?;
            }
            state
        }
    };

    tracing::debug!(token_ttl_seconds = token_ttl, "token lifetime configured");
    Ok(state.with_token_ttl(token_ttl))
}
