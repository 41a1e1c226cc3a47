use std::env;

use crate::interface_adapters::state::DEFAULT_TOKEN_TTL_SECONDS;

// Runtime settings read from the environment (after `.env` is loaded).

pub fn http_port() -> u16 {
    env::var("STUDIO_SERVER_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(8080)
}

// PostgreSQL is used only when a non-empty DATABASE_URL is set.
pub fn database_url() -> Option<String> {
    env::var("DATABASE_URL")
        .ok()
        .filter(|value| !value.trim().is_empty())
}

pub fn token_ttl_seconds() -> u64 {
    env::var("TOKEN_TTL_SECONDS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .filter(|ttl| *ttl > 0)
        .unwrap_or(DEFAULT_TOKEN_TTL_SECONDS)
}

pub fn seed_demo_data() -> bool {
    env::var("SEED_DEMO_DATA")
        .map(|value| parse_flag(&value))
        .unwrap_or(true)
}

fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}
