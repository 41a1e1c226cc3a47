use serde::Deserialize;

// Error envelope returned by the studio API.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}
