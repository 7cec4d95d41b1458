//! Text-generation collaborators.
//!
//! This module handles:
//! - The `TextGenerator` seam the session calls for each accepted remix
//! - `HttpGenerator`: the real service, reached with a bearer credential
//! - `OfflineGenerator`: a simulated service used when no endpoint is configured
//! - Decoding the service's heterogeneous response shapes

mod http;
mod offline;
mod response;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::config::Config;
use crate::style::StyleId;

pub use http::HttpGenerator;
pub use offline::OfflineGenerator;
pub use response::{ResponseShape, extract_text};

/// Upper bound on generated tokens, fixed for every request
pub const MAX_TOKENS: u32 = 500;

/// Sampling temperature, fixed for every request
pub const TEMPERATURE: f64 = 0.7;

/// A single generation call. Only `prompt`, `max_tokens` and `temperature`
/// go on the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationRequest {
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f64,
    #[serde(skip)]
    pub style: StyleId,
    #[serde(skip)]
    pub subject: String,
}

impl GenerationRequest {
    /// Build a request with the fixed generation parameters
    pub fn new(prompt: String, style: StyleId, subject: String) -> Self {
        Self {
            prompt,
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
            style,
            subject,
        }
    }
}

/// Ways a generation call can fail. All of them surface to the user as the
/// same fixed message.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Service returned {status}")]
    Service { status: reqwest::StatusCode },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The generation task died before producing an outcome
    #[error("Generation task failed: {0}")]
    TaskFailed(String),
}

/// Something that turns a prompt into generated text
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError>;

    /// Short name for logs and status output
    fn name(&self) -> &'static str;
}

/// Pick the collaborator described by the configuration.
///
/// An endpoint selects the HTTP service and then requires an API key.
/// Without an endpoint remixes are simulated locally.
pub fn from_config(config: &Config) -> Result<Arc<dyn TextGenerator>> {
    match config.api.endpoint.as_deref() {
        Some(endpoint) => {
            let Some(api_key) = config.api.api_key.as_deref() else {
                anyhow::bail!(
                    "api.endpoint is set but no API key was provided (set api.api_key or REMIXER_API_KEY)"
                );
            };
            tracing::info!("Using text-generation service at {}", endpoint);
            Ok(Arc::new(HttpGenerator::new(endpoint, api_key)?))
        }
        None => {
            tracing::warn!("No API endpoint configured, remixes will be simulated");
            Ok(Arc::new(OfflineGenerator::new(
                Duration::from_millis(config.offline.delay_ms),
                config.ui.locale,
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_wire_format() {
        let request = GenerationRequest::new(
            "Be formal.\n\nhey".to_string(),
            StyleId::Formal,
            "hey".to_string(),
        );
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "prompt": "Be formal.\n\nhey",
                "max_tokens": 500,
                "temperature": 0.7
            })
        );
    }

    #[test]
    fn test_from_config_without_endpoint_is_offline() {
        let config = Config::default();
        let generator = from_config(&config).unwrap();
        assert_eq!(generator.name(), "offline");
    }

    #[test]
    fn test_from_config_with_endpoint_and_key_is_http() {
        let mut config = Config::default();
        config.api.endpoint = Some("http://localhost:9/v1/complete".to_string());
        config.api.api_key = Some("secret".to_string());
        let generator = from_config(&config).unwrap();
        assert_eq!(generator.name(), "http");
    }

    #[test]
    fn test_from_config_endpoint_requires_key() {
        let mut config = Config::default();
        config.api.endpoint = Some("http://localhost:9/v1/complete".to_string());
        let err = from_config(&config).err().unwrap();
        assert!(err.to_string().contains("API key"));
    }
}
