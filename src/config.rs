use std::time::Duration;

use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "websum")]
#[command(about = "Fetch a web page and print a short LLM-generated summary", long_about = None)]
pub struct AppConfig {
    /// Page to summarize; prompts on stdin when omitted
    #[arg(value_name = "URL")]
    pub url: Option<String>,

    #[arg(long, env = "LLM_PROVIDER", default_value = "ollama")]
    pub provider: String,

    /// Overrides the active provider's default model
    #[arg(long, env = "LLM_MODEL")]
    pub model: Option<String>,

    #[arg(long, env = "OLLAMA_BASE_URL", default_value = "http://localhost:11434/v1")]
    pub ollama_base_url: String,

    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,

    #[arg(long, env = "OPENAI_BASE_URL", default_value = "https://api.openai.com/v1")]
    pub openai_base_url: String,

    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub gemini_api_key: Option<String>,

    #[arg(
        long,
        env = "GEMINI_BASE_URL",
        default_value = "https://generativelanguage.googleapis.com/v1beta"
    )]
    pub gemini_base_url: String,

    /// Per-request timeout for the fetch and the backend call
    #[arg(long, env = "LLM_TIMEOUT_SECS", default_value_t = 120)]
    pub timeout_secs: u64,
}

impl AppConfig {
    pub fn from_env_and_args() -> Self {
        Self::parse()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be > 0".into());
        }
        url::Url::parse(&self.ollama_base_url)
            .map_err(|_| "Invalid OLLAMA_BASE_URL URL format".to_string())?;
        url::Url::parse(&self.openai_base_url)
            .map_err(|_| "Invalid OPENAI_BASE_URL URL format".to_string())?;
        url::Url::parse(&self.gemini_base_url)
            .map_err(|_| "Invalid GEMINI_BASE_URL URL format".to_string())?;
        Ok(())
    }
}

#[cfg(test)]
impl AppConfig {
    /// Baseline config for unit tests; fields overridden per test.
    pub(crate) fn for_tests() -> Self {
        Self {
            url: None,
            provider: "ollama".into(),
            model: None,
            ollama_base_url: "http://localhost:11434/v1".into(),
            openai_api_key: None,
            openai_base_url: "https://api.openai.com/v1".into(),
            gemini_api_key: None,
            gemini_base_url: "https://generativelanguage.googleapis.com/v1beta".into(),
            timeout_secs: 120,
        }
    }
}
