use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{error, info, warn};

use crate::external::report_provider::{ReportError, ReportProvider};

const MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
const DEFAULT_MODEL: &str = "claude-3-5-sonnet-latest";

/// Anthropic Messages API provider for narrative report generation.
pub struct AnthropicProvider {
    api_key: String,
    model: String,
    max_tokens: usize,
    client: Client,
}

impl AnthropicProvider {
    pub fn new(api_key: String, model: Option<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(55))
            .build()
            .unwrap_or_default();

        Self {
            api_key,
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            max_tokens: 2000,
            client,
        }
    }

    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("ANTHROPIC_API_KEY").ok()?;
        let model = std::env::var("REPORT_MODEL").ok();
        Some(Self::new(api_key, model))
    }

    async fn call_with_retry(&self, request: MessagesRequest) -> Result<MessagesResponse, ReportError> {
        let mut retry_count = 0;
        let max_retries = 3;
        let mut delay = Duration::from_secs(1);

        loop {
            match self.call_messages(&request).await {
                Ok(response) => return Ok(response),
                Err(e @ ReportError::Api(_)) => return Err(e),
                Err(e) => {
                    retry_count += 1;
                    if retry_count >= max_retries {
                        error!("Anthropic API call failed after {} retries: {}", max_retries, e);
                        return Err(e);
                    }

                    warn!(
                        "Anthropic API call failed (attempt {}/{}): {}. Retrying in {:?}...",
                        retry_count, max_retries, e, delay
                    );
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                }
            }
        }
    }

    async fn call_messages(&self, request: &MessagesRequest) -> Result<MessagesResponse, ReportError> {
        let response = self
            .client
            .post(MESSAGES_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ReportError::Timeout
                } else {
                    ReportError::Network(e.to_string())
                }
            })?;

        let status = response.status();

        if status == 429 {
            return Err(ReportError::RateLimited);
        }

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ReportError::Api(format!("HTTP {}: {}", status, error_text)));
        }

        response
            .json::<MessagesResponse>()
            .await
            .map_err(|e| ReportError::InvalidResponse(e.to_string()))
    }
}

#[derive(Debug, Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: usize,
    messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct Usage {
    input_tokens: u32,
    output_tokens: u32,
}

#[async_trait]
impl ReportProvider for AnthropicProvider {
    async fn generate(&self, prompt: String) -> Result<String, ReportError> {
        info!("Generating report (model: {}, max_tokens: {})", self.model, self.max_tokens);

        let request = MessagesRequest {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            messages: vec![Message {
                role: "user".to_string(),
                content: prompt,
            }],
        };

        let response = self.call_with_retry(request).await?;

        if let Some(usage) = response.usage {
            info!(
                "Report generated. Tokens: {} input + {} output",
                usage.input_tokens, usage.output_tokens
            );
        }

        let text = response
            .content
            .into_iter()
            .next()
            .ok_or_else(|| ReportError::InvalidResponse("No content in response".to_string()))?
            .text;

        Ok(text)
    }
}
