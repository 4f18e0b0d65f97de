use std::time::Duration;

use crate::errors::SummarizeError;
use crate::prompt::Message;
use crate::providers::{extract_chat_text, Provider};

pub const DEFAULT_MODEL: &str = "llama3.2";

// Ollama's OpenAI-compatible endpoint requires a bearer token but ignores it.
const SENTINEL_API_KEY: &str = "ollama";

pub struct OllamaProvider {
    base_url: String,
    model: String,
    timeout: Duration,
}

impl OllamaProvider {
    pub fn new(base_url: String, model: Option<String>, timeout: Duration) -> Self {
        Self {
            base_url,
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            timeout,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl Provider for OllamaProvider {
    fn name(&self) -> &'static str {
        "ollama"
    }

    fn summarize(&self, messages: &[Message]) -> Result<String, SummarizeError> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        let body = serde_json::json!({
            "model": self.model,
            "messages": messages,
        });

        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| SummarizeError::Http(format!("build http client: {e}")))?;

        let resp = client
            .post(&url)
            .bearer_auth(SENTINEL_API_KEY)
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
        extract_chat_text(&v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::build_messages;
    use std::io::Write;
    use std::net::{TcpListener, TcpStream};
    use std::thread;

    fn write_http_response(mut stream: TcpStream, status: &str, body: &str) {
        let resp = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        let _ = stream.write_all(resp.as_bytes());
        let _ = stream.flush();
    }

    #[test]
    fn model_override_wins_over_default() {
        let p = OllamaProvider::new(
            "http://localhost:11434/v1".into(),
            Some("mistral".into()),
            Duration::from_secs(5),
        );
        assert_eq!(p.model(), "mistral");

        let p = OllamaProvider::new("http://localhost:11434/v1".into(), None, Duration::from_secs(5));
        assert_eq!(p.model(), DEFAULT_MODEL);
    }

    #[test]
    fn success_path_returns_first_choice_content() {
        let listener = TcpListener::bind(("127.0.0.1", 0)).expect("bind");
        let addr = listener.local_addr().unwrap();
        let handle = thread::spawn(move || {
            if let Ok((stream, _)) = listener.accept() {
                let mut buf = [0u8; 4096];
                let _ = stream.peek(&mut buf);
                write_http_response(
                    stream,
                    "200 OK",
                    "{\"choices\":[{\"message\":{\"role\":\"assistant\",\"content\":\"SUMMARY_OK\"}}]}",
                );
            }
        });

        let base = format!("http://{}:{}/v1", addr.ip(), addr.port());
        let p = OllamaProvider::new(base, None, Duration::from_secs(5));
        let out = p.summarize(&build_messages("Hello world")).expect("summarize ok");
        assert_eq!(out, "SUMMARY_OK");
        let _ = handle.join();
    }

    #[test]
    fn server_error_surfaces_as_http_error() {
        let listener = TcpListener::bind(("127.0.0.1", 0)).expect("bind");
        let addr = listener.local_addr().unwrap();
        let handle = thread::spawn(move || {
            if let Ok((stream, _)) = listener.accept() {
                let mut buf = [0u8; 4096];
                let _ = stream.peek(&mut buf);
                write_http_response(stream, "500 Internal Server Error", "");
            }
        });

        let base = format!("http://{}:{}/v1", addr.ip(), addr.port());
        let p = OllamaProvider::new(base, None, Duration::from_secs(5));
        let err = p.summarize(&build_messages("ctx")).unwrap_err();
        assert!(matches!(err, SummarizeError::Http(_)));
        let _ = handle.join();
    }
}
