use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Serialize;
use std::time::Duration;

use crate::domain::{
    AuthProvider, AuthProviderError, LoginRequest, RegisterRequest, SessionInformation,
};
use crate::interface_adapters::protocol::ErrorResponse;

// Thin reqwest client for the studio API auth endpoints.
#[derive(Clone)]
pub struct AuthClient {
    http: Client,
    base_url: String,
}

impl AuthClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(timeout).build()?;
        let base_url: String = base_url.into();
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response, AuthProviderError> {
        let url = format!("{}{path}", self.base_url);
        let res = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|err| AuthProviderError::Transport(err.to_string()))?;
        let status = res.status();

        // Keep upstream status/message so callers can tell 401 from other 4xx.
        if !status.is_success() {
            let message = res
                .json::<ErrorResponse>()
                .await
                .ok()
                .map(|payload| payload.message);
            return Err(AuthProviderError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        Ok(res)
    }
}

#[async_trait]
impl AuthProvider for AuthClient {
    async fn login(&self, req: LoginRequest) -> Result<SessionInformation, AuthProviderError> {
        let res = self.post("/api/auth/login", &req).await?;

        res.json::<SessionInformation>()
            .await
            .map_err(|err| AuthProviderError::Decode(err.to_string()))
    }

    async fn register(&self, req: RegisterRequest) -> Result<(), AuthProviderError> {
        // The success body is only a confirmation message.
        self.post("/api/auth/register", &req).await?;
        Ok(())
    }
}
