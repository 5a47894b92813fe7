use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::constants::llm::SYSTEM_PROMPT;
use crate::error::{Error, Result};
use crate::llm::parse::parse_song_json;
use crate::llm::types::{ChatRequest, ChatResponse, Message};
use crate::llm::SongFormatter;
use crate::song::SongDraft;

/// Client for an OpenAI-compatible chat-completion API
#[derive(Clone)]
pub struct ChatClient {
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    client: Client,
}

impl ChatClient {
    /// Create a new chat client from config
    pub fn new(config: &Config) -> Self {
        Self {
            api_key: config.openai_api_key.clone(),
            base_url: config.openai_base_url.trim_end_matches('/').to_string(),
            model: config.openai_model.clone(),
            temperature: config.temperature,
            client: Client::builder()
                .timeout(Duration::from_secs(config.request_timeout_secs))
                .build()
                .unwrap_or_default(),
        }
    }

    /// Check if an API key is configured
    fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// Build the request body for one chord sheet
    fn request_for(&self, text: &str) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![Message::system(SYSTEM_PROMPT), Message::user(text)],
            temperature: self.temperature,
        }
    }

    /// POST a chat-completion request and return the first choice's text
    pub async fn complete(&self, request: &ChatRequest) -> Result<String> {
        if !self.is_configured() {
            return Err(Error::config(
                "Language model client not configured",
                "Set the OPENAI_API_KEY environment variable",
            ));
        }

        let url = format!("{}/chat/completions", self.base_url);
        let started = Instant::now();
        let resp = self.client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| Error::ConnectionFailed(format!("Request to {url} failed: {e}")))?;

        let status = resp.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = resp
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u64>().ok());
            return Err(Error::RateLimited { retry_after });
        }
        if !status.is_success() {
            return Err(Error::api_status(
                format!("Request to {url} returned {status}"),
                status.as_u16(),
            ));
        }

        let body: ChatResponse = resp.json().await.map_err(|e| {
            if e.is_timeout() {
                Error::ConnectionFailed(format!("Reading response from {url} timed out: {e}"))
            } else {
                Error::malformed(format!("Invalid JSON from {url}: {e}"))
            }
        })?;

        tracing::debug!("Chat completion from {} took {:.2?}", self.model, started.elapsed());

        body.first_content()
            .filter(|content| !content.is_empty())
            .map(str::to_string)
            .ok_or_else(|| Error::malformed("response has no message content"))
    }
}

#[async_trait]
impl SongFormatter for ChatClient {
    async fn format_song(&self, text: &str) -> Result<SongDraft> {
        let content = self.complete(&self.request_for(text)).await?;
        parse_song_json(&content).inspect_err(|_| {
            tracing::debug!("Unparsable model output:\n{content}");
        })
    }
}
