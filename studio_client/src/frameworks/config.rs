use std::{env, time::Duration};

use url::Url;

use crate::use_cases::session_store::DEFAULT_STREAM_CAPACITY;

const DEFAULT_API_URL: &str = "http://127.0.0.1:8080";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("STUDIO_API_URL `{value}` is not a valid URL: {source}")]
    InvalidApiUrl {
        value: String,
        source: url::ParseError,
    },
    #[error("STUDIO_API_URL `{0}` must use http or https")]
    UnsupportedScheme(String),
}

pub fn api_url() -> Result<Url, ConfigError> {
    let value = env::var("STUDIO_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
    parse_api_url(&value)
}

fn parse_api_url(value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value).map_err(|source| ConfigError::InvalidApiUrl {
        value: value.to_string(),
        source,
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::UnsupportedScheme(value.to_string()));
    }
    Ok(url)
}

pub fn api_timeout() -> Duration {
    let millis = env::var("STUDIO_API_TIMEOUT_MS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(3000);
    Duration::from_millis(millis)
}

pub fn stream_capacity() -> usize {
    env::var("SESSION_STREAM_CAPACITY")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .filter(|capacity| *capacity > 0)
        .unwrap_or(DEFAULT_STREAM_CAPACITY)
}

// Credentials used by the demo binary.
pub fn demo_credentials() -> (String, String) {
    let email = env::var("STUDIO_EMAIL").unwrap_or_else(|_| "yoga@studio.com".to_string());
    let password = env::var("STUDIO_PASSWORD").unwrap_or_else(|_| "test!1234".to_string());
    (email, password)
}
