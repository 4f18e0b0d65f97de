use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request error: {0}")]
    Request(String),
    #[error("http status {status} from {url}")]
    Status { status: u16, url: String },
    #[error("empty document at {0}")]
    EmptyDocument(String),
}

#[derive(Debug, Error)]
pub enum SummarizeError {
    #[error("missing configuration: {0}")]
    Config(String),
    #[error("backend unavailable: {0}")]
    Unavailable(String),
    #[error("http error: {0}")]
    Http(String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error(transparent)]
    Fetch(#[from] FetchError),
}
