// Bootstrap for the demo client: config, tracing, then one login round trip.

use std::io::{Error, Result};
use std::sync::Arc;

use crate::domain::LoginRequest;
use crate::frameworks::config;
use crate::interface_adapters::clients::auth::AuthClient;
use crate::use_cases::auth_flow::{LoginUseCase, LogoutUseCase};
use crate::use_cases::session_store::{SessionStore, StoreSettings};

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

pub async fn run_with_config() -> Result<()> {
    init_runtime();

    let api_url = config::api_url().map_err(Error::other)?;
    let api_timeout = config::api_timeout();
    let auth_client = AuthClient::new(api_url.as_str(), api_timeout)
        .map_err(|e| Error::other(format!("failed to initialize auth client: {e}")))?;
    tracing::debug!(
        api_url = %api_url,
        api_timeout_ms = api_timeout.as_millis(),
        "auth client configured"
    );

    let store = SessionStore::new(StoreSettings {
        stream_capacity: config::stream_capacity(),
    });

    // Log every status change until the store goes away.
    let mut is_logged = store.is_logged_stream();
    let watcher = tokio::spawn(async move {
        while let Some(value) = is_logged.next().await {
            tracing::info!(is_logged = value, "login status changed");
        }
    });

    let (email, password) = config::demo_credentials();
    let login = LoginUseCase {
        provider: Arc::new(auth_client),
        store: store.clone(),
    };
    match login.execute(LoginRequest { email, password }).await {
        Ok(info) => {
            tracing::info!(
                user_id = info.id,
                username = %info.username,
                admin = store.is_admin(),
                "session ready"
            );
            LogoutUseCase {
                store: store.clone(),
            }
            .execute();
        }
        Err(err) => tracing::error!(error = %err, "login failed"),
    }

    drop(login);
    drop(store);
    watcher
        .await
        .map_err(|e| Error::other(format!("status watcher failed: {e}")))
}
