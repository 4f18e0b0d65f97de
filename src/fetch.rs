use std::time::Duration;

use scraper::{ElementRef, Html, Selector};

use crate::errors::FetchError;

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0 Safari/537.36";

// Subtrees that carry chrome rather than content.
const SKIPPED_TAGS: [&str; 6] = ["script", "style", "nav", "header", "footer", "noscript"];

/// Fetch a page and reduce it to plain text: title line first, then the body
/// text with navigation-like subtrees dropped and whitespace collapsed.
pub fn fetch_contents(url: &str, timeout: Duration) -> Result<String, FetchError> {
    let client = reqwest::blocking::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
        .map_err(|e| FetchError::Request(format!("build http client: {e}")))?;

    let resp = client
        .get(url)
        .send()
        .map_err(|e| FetchError::Request(format!("connect {url}: {e}")))?;

    if !resp.status().is_success() {
        return Err(FetchError::Status {
            status: resp.status().as_u16(),
            url: url.to_string(),
        });
    }

    let html = resp
        .text()
        .map_err(|e| FetchError::Request(format!("read body from {url}: {e}")))?;

    let text = extract_text(&html);
    if text.is_empty() {
        return Err(FetchError::EmptyDocument(url.to_string()));
    }
    tracing::debug!(%url, chars = text.len(), "page text extracted");
    Ok(text)
}

/// Plain text of an HTML document: `<title>` first, then the visible body text.
fn extract_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let mut out = String::new();
    if let Ok(selector) = Selector::parse("title") {
        if let Some(title) = document.select(&selector).next() {
            let title: String = title.text().collect();
            let title = title.trim();
            if !title.is_empty() {
                out.push_str(title);
                out.push('\n');
            }
        }
    }

    let mut body = String::new();
    collect_text(document.root_element(), &mut body);
    out.push_str(&collapse_whitespace(&body));
    out.trim().to_string()
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    let name = element.value().name();
    if SKIPPED_TAGS.contains(&name) || name == "title" {
        return;
    }
    for child in element.children() {
        if let Some(el) = ElementRef::wrap(child) {
            collect_text(el, out);
        } else if let scraper::Node::Text(text) = child.value() {
            out.push_str(text);
            out.push(' ');
        }
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::net::{TcpListener, TcpStream};
    use std::thread;

    const PAGE: &str = "<html><head><title>Test Page</title>\
        <script>var hidden = 1;</script><style>body { color: red }</style></head>\
        <body><nav>Home | About | Contact</nav>\
        <h1>Welcome</h1><p>Actual   content\nhere.</p>\
        <footer>copyright notice</footer></body></html>";

    fn write_http_response(mut stream: TcpStream, status: &str, body: &str) {
        let resp = format!(
            "HTTP/1.1 {}\r\nContent-Type: text/html\r\nContent-Length: {}\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        let _ = stream.write_all(resp.as_bytes());
        let _ = stream.flush();
    }

    #[test]
    fn extracts_title_and_content_drops_chrome() {
        let text = extract_text(PAGE);
        assert!(text.starts_with("Test Page"));
        assert!(text.contains("Welcome"));
        assert!(text.contains("Actual content here."));
        assert!(!text.contains("hidden"));
        assert!(!text.contains("color: red"));
        assert!(!text.contains("Home | About"));
        assert!(!text.contains("copyright"));
    }

    #[test]
    fn collapses_runs_of_whitespace() {
        assert_eq!(collapse_whitespace("a \n\n  b\t c"), "a b c");
    }

    #[test]
    fn fetches_over_http() {
        let listener = TcpListener::bind(("127.0.0.1", 0)).expect("bind");
        let addr = listener.local_addr().unwrap();
        let handle = thread::spawn(move || {
            if let Ok((stream, _)) = listener.accept() {
                let mut buf = [0u8; 1024];
                let _ = stream.peek(&mut buf);
                write_http_response(stream, "200 OK", PAGE);
            }
        });

        let url = format!("http://{}:{}/", addr.ip(), addr.port());
        let text = fetch_contents(&url, Duration::from_secs(5)).expect("fetch ok");
        assert!(text.contains("Welcome"));
        let _ = handle.join();
    }

    #[test]
    fn non_success_status_is_an_error() {
        let listener = TcpListener::bind(("127.0.0.1", 0)).expect("bind");
        let addr = listener.local_addr().unwrap();
        let handle = thread::spawn(move || {
            if let Ok((stream, _)) = listener.accept() {
                let mut buf = [0u8; 1024];
                let _ = stream.peek(&mut buf);
                write_http_response(stream, "404 Not Found", "");
            }
        });

        let url = format!("http://{}:{}/missing", addr.ip(), addr.port());
        let err = fetch_contents(&url, Duration::from_secs(5)).unwrap_err();
        match err {
            FetchError::Status { status, .. } => assert_eq!(status, 404),
            other => panic!("expected status error, got {other}"),
        }
        let _ = handle.join();
    }
}
