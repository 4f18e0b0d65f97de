use crate::config::AppConfig;
use crate::errors::SummarizeError;
use crate::fetch;
use crate::prompt::{self, Message};

/// One interchangeable LLM backend. Adapters build their own client, issue the
/// request, and normalize the response into plain text.
pub trait Provider: Send + Sync {
    fn name(&self) -> &'static str;
    fn summarize(&self, messages: &[Message]) -> Result<String, SummarizeError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Ollama,
    OpenAi,
    Gemini,
}

impl ProviderKind {
    /// Case-insensitive; anything unrecognized falls back to Ollama.
    pub fn from_config_value(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "openai" => Self::OpenAi,
            "gemini" => Self::Gemini,
            _ => Self::Ollama,
        }
    }
}

mod ollama;
mod openai;
#[cfg(feature = "provider-gemini")]
mod gemini;

/// Build the adapter for the configured provider. Constructed fresh per call;
/// nothing is shared between invocations.
pub fn build_provider(cfg: &AppConfig) -> Result<Box<dyn Provider>, SummarizeError> {
    match ProviderKind::from_config_value(&cfg.provider) {
        ProviderKind::Ollama => Ok(Box::new(ollama::OllamaProvider::new(
            cfg.ollama_base_url.clone(),
            cfg.model.clone(),
            cfg.timeout(),
        ))),
        ProviderKind::OpenAi => Ok(Box::new(openai::OpenAiProvider::new(
            cfg.openai_base_url.clone(),
            cfg.openai_api_key.clone(),
            cfg.model.clone(),
            cfg.timeout(),
        ))),
        #[cfg(feature = "provider-gemini")]
        ProviderKind::Gemini => Ok(Box::new(gemini::GeminiProvider::new(
            cfg.gemini_base_url.clone(),
            cfg.gemini_api_key.clone(),
            cfg.model.clone(),
            cfg.timeout(),
        )?)),
        #[cfg(not(feature = "provider-gemini"))]
        ProviderKind::Gemini => Err(SummarizeError::Unavailable(
            "gemini support is not compiled in; rebuild with --features provider-gemini".into(),
        )),
    }
}

/// Fetch the page, build the prompt, and run it through the selected backend.
/// Provider construction happens first so a misconfigured backend fails before
/// any network traffic.
pub fn summarize_url(cfg: &AppConfig, url: &str) -> Result<String, SummarizeError> {
    let provider = build_provider(cfg)?;
    let page_text = fetch::fetch_contents(url, cfg.timeout())?;
    tracing::debug!(
        provider = provider.name(),
        chars = page_text.len(),
        "submitting page for summarization"
    );
    let messages = prompt::build_messages(&page_text);
    provider.summarize(&messages)
}

/// First choice's message content from an OpenAI-style chat completion body.
pub(crate) fn extract_chat_text(v: &serde_json::Value) -> Result<String, SummarizeError> {
    v.get("choices")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(|x| x.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| SummarizeError::Parse("no message content in chat response".into()))
}
