// wine-probe/src/client.rs
// ============================================================================
// Module: Prediction HTTP Client
// Description: Minimal JSON POST client for the prediction endpoint.
// Purpose: Send one request per call and hand back status plus raw body.
// Dependencies: reqwest, serde, serde_json, url
// ============================================================================

//! ## Overview
//! Each call opens a fresh connection: idle pooling is disabled and no retry
//! is attempted. A request timeout is applied only when one is configured;
//! otherwise a silent endpoint blocks the caller indefinitely.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::checks::CheckError;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    /// HTTP status code.
    pub status: u16,
    /// Response body decoded as UTF-8 (lossy).
    pub body: String,
}

impl HttpReply {
    /// Decodes the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::MalformedJson`] when the body is not valid JSON.
    pub fn json(&self) -> Result<Value, CheckError> {
        serde_json::from_str(&self.body).map_err(|err| CheckError::MalformedJson(err.to_string()))
    }
}

/// HTTP client bound to a single prediction endpoint.
#[derive(Debug, Clone)]
pub struct PredictionClient {
    /// Endpoint receiving every POST.
    endpoint: Url,
    /// Underlying reqwest client.
    client: Client,
}

impl PredictionClient {
    /// Builds a client for `endpoint`, applying `timeout` to each request when set.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::Transport`] when the HTTP client cannot be built.
    pub fn new(endpoint: Url, timeout: Option<Duration>) -> Result<Self, CheckError> {
        let mut builder = Client::builder().pool_max_idle_per_host(0);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| CheckError::Transport(format!("failed to build http client: {err}")))?;
        Ok(Self {
            endpoint,
            client,
        })
    }

    /// Returns the endpoint URL.
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// POSTs `payload` as JSON and returns the reply without inspecting it.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::Transport`] when the request cannot be sent or the
    /// body cannot be read.
    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        payload: &T,
    ) -> Result<HttpReply, CheckError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(payload)
            .send()
            .await
            .map_err(|err| CheckError::Transport(err.to_string()))?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await.map_err(|err| CheckError::Transport(err.to_string()))?;
        Ok(HttpReply {
            status,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        })
    }
}
