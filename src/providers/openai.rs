use std::time::Duration;

use crate::errors::SummarizeError;
use crate::prompt::Message;
use crate::providers::{extract_chat_text, Provider};

pub const DEFAULT_MODEL: &str = "gpt-5-nano";

// Low temperature keeps the summary relatively deterministic.
const SUMMARY_TEMPERATURE: f64 = 0.3;

pub struct OpenAiProvider {
    base_url: String,
    api_key: Option<String>,
    model: String,
    timeout: Duration,
}

impl OpenAiProvider {
    /// The key is passed explicitly rather than read inside the HTTP layer;
    /// a missing key surfaces as an authentication failure from the backend,
    /// not as a construction error.
    pub fn new(
        base_url: String,
        api_key: Option<String>,
        model: Option<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            base_url,
            api_key,
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            timeout,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl Provider for OpenAiProvider {
    fn name(&self) -> &'static str {
        "openai"
    }

    fn summarize(&self, messages: &[Message]) -> Result<String, SummarizeError> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        let body = serde_json::json!({
            "model": self.model,
            "messages": messages,
            "temperature": SUMMARY_TEMPERATURE,
        });

        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| SummarizeError::Http(format!("build http client: {e}")))?;

        let mut req = client.post(&url).json(&body);
        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key);
        }

        let resp = req
            .send()
            .map_err(|e| SummarizeError::Http(format!("connect {}: {e}", self.base_url)))?;

        if !resp.status().is_success() {
            return Err(SummarizeError::Http(format!(
                "status {} from {url}",
                resp.status()
            )));
        }

        let v: serde_json::Value = resp
            .json()
            .map_err(|e| SummarizeError::Parse(format!("decode response: {e}")))?;
        extract_chat_text(&v)
    }
}
