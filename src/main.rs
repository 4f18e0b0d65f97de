use std::io::{BufRead, Write};

mod config;
mod errors;
mod fetch;
mod health;
mod logging;
mod prompt;
mod providers;

use crate::config::AppConfig;
use crate::providers::ProviderKind;

fn main() -> anyhow::Result<()> {
    logging::init_logging();

    let cfg = AppConfig::from_env_and_args();
    if let Err(e) = cfg.validate() {
        tracing::warn!(config_error=%e, "invalid config");
    }

    let url = match cfg.url.clone() {
        Some(u) => u,
        None => prompt_for_url()?,
    };
    if url.is_empty() {
        anyhow::bail!("no URL given");
    }

    // Startup health check (best-effort, logged only)
    if ProviderKind::from_config_value(&cfg.provider) == ProviderKind::Ollama {
        let ollama_ok = health::check_ollama(&cfg.ollama_base_url);
        tracing::info!(ollama_ok, base_url=%cfg.ollama_base_url, "startup health check");
    }

    tracing::info!(%url, provider=%cfg.provider, "fetching and summarizing");
    let summary = providers::summarize_url(&cfg, &url)?;
    println!("{summary}");
    Ok(())
}

fn prompt_for_url() -> anyhow::Result<String> {
    eprint!("Enter a URL to summarize: ");
    std::io::stderr().flush()?;
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
