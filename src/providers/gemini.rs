use std::time::Duration;

use crate::errors::SummarizeError;
use crate::prompt::{self, Message};
use crate::providers::Provider;

pub const DEFAULT_MODEL: &str = "gemini-2.5-pro";

pub struct GeminiProvider {
    base_url: String,
    api_key: String,
    model: String,
    timeout: Duration,
}

impl GeminiProvider {
    /// Fails fast when the key is absent, before any network traffic.
    pub fn new(
        base_url: String,
        api_key: Option<String>,
        model: Option<String>,
        timeout: Duration,
    ) -> Result<Self, SummarizeError> {
        let api_key = api_key
            .filter(|k| !k.is_empty())
            .ok_or_else(|| SummarizeError::Config("GEMINI_API_KEY is not set".into()))?;
        Ok(Self {
            base_url,
            api_key,
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            timeout,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

/// Concatenated text of the first candidate's parts; empty string when the
/// response carries no text at all.
fn extract_text(v: &serde_json::Value) -> String {
    let text = v
        .get("candidates")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.as_array())
        .map(|parts| {
            parts
                .iter()
                .filter_map(|p| p.get("text").and_then(|t| t.as_str()))
                .collect::<String>()
        })
        .unwrap_or_default();
    text.trim().to_string()
}

impl Provider for GeminiProvider {
    fn name(&self) -> &'static str {
        "gemini"
    }

    fn summarize(&self, messages: &[Message]) -> Result<String, SummarizeError> {
        // Gemini's generate endpoint takes one untagged prompt string.
        let full_prompt = prompt::flatten(messages);
        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        );
        let body = serde_json::json!({
            "contents": [{"parts": [{"text": full_prompt}]}],
        });

        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| SummarizeError::Http(format!("build http client: {e}")))?;

        let resp = client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
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
        Ok(extract_text(&v))
    }
}
