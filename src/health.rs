/// Best-effort probe of an OpenAI-compatible endpoint via its model listing.
pub fn check_ollama(base_url: &str) -> bool {
    let url = format!("{}/models", base_url.trim_end_matches('/'));
    reqwest::blocking::Client::new()
        .get(url)
        .send()
        .map(|r| r.status().is_success())
        .unwrap_or(false)
}
