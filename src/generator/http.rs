//! HTTP client for the text-generation service.

use anyhow::Result;
use async_trait::async_trait;

use super::{GenerationError, GenerationRequest, ResponseShape, TextGenerator, extract_text};

/// User agent for API requests
const USER_AGENT: &str = concat!("Remixer/", env!("CARGO_PKG_VERSION"));

/// Text-generation service reached over HTTP
#[derive(Clone)]
pub struct HttpGenerator {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl HttpGenerator {
    /// Create a client for the given endpoint and bearer credential
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        })
    }
}

#[async_trait]
impl TextGenerator for HttpGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        let start = std::time::Instant::now();

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        // Any non-success status is a failure, whatever the body says
        let status = response.status();
        if !status.is_success() {
            return Err(GenerationError::Service { status });
        }

        let body = response.bytes().await?;
        let shape = extract_text(&body)?;

        match &shape {
            ResponseShape::Completion(_) => tracing::debug!("Decoded completion payload"),
            ResponseShape::Choices(_) => tracing::debug!("Decoded choices payload"),
            ResponseShape::Empty => {
                tracing::warn!("Service response carried no generated text; treating as empty result")
            }
        }

        let text = shape.into_text();
        tracing::info!(
            "Generated {} chars in {:.1}s",
            text.chars().count(),
            start.elapsed().as_secs_f32()
        );
        Ok(text)
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
