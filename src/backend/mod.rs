//! Client for the hosted backend: row storage behind row-level security,
//! the auth service, and object storage, all spoken over HTTP.
//!
//! A single `Backend` is constructed in `main` and handed to handlers through
//! Rocket's managed state. Every request carries the anonymous project key
//! plus the calling administrator's own access token, so the backend's
//! row-level policies are evaluated against the actual caller.

use reqwest::{Client, RequestBuilder};
use thiserror::Error;

use crate::config::Config;

pub mod auth;
pub mod storage;
pub mod tables;

pub use auth::AuthUser;
pub use tables::SelectQuery;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl BackendError {
    /// Status of the remote response, when the failure came from one.
    pub fn status(&self) -> Option<u16> {
        match self {
            BackendError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[derive(Clone)]
pub struct Backend {
    http: Client,
    base_url: String,
    anon_key: String,
}

impl Backend {
    /// No request timeout is configured: failure is observed only through the
    /// remote call's own error channel.
    pub fn new(config: &Config) -> Result<Self, BackendError> {
        Ok(Self {
            http: Client::builder().build()?,
            base_url: config.backend_url.clone(),
            anon_key: config.backend_anon_key.clone(),
        })
    }

    pub(crate) fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    pub(crate) fn auth_url(&self, endpoint: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, endpoint)
    }

    pub(crate) fn storage_url(&self, path: &str) -> String {
        format!("{}/storage/v1/{}", self.base_url, path)
    }

    /// Attaches the project key and the caller's bearer token.
    pub(crate) fn authorize(&self, request: RequestBuilder, token: &str) -> RequestBuilder {
        request
            .header("apikey", self.anon_key.as_str())
            .bearer_auth(token)
    }
}

/// Reads a non-success response into a `BackendError::Api`, surfacing the raw
/// body as the message so the operator sees what the backend actually said.
pub(crate) async fn error_for_response(response: reqwest::Response) -> BackendError {
    let status = response.status().as_u16();
    let message = match response.text().await {
        Ok(body) if !body.is_empty() => body,
        _ => "(empty response body)".to_string(),
    };
    BackendError::Api { status, message }
}
