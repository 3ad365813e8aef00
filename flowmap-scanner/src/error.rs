use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("HTTP client setup failed: {0}")]
    Client(#[from] FetchError),
}

/// Failure to retrieve a single page. Never aborts a crawl.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected status code: {0}")]
    Status(u16),

    #[error("Request timed out")]
    Timeout,

    #[error("Not an HTML document: {0}")]
    NotHtml(String),

    #[error("Other error: {0}")]
    Other(String),
}

/// Reason a discovered link was discarded.
#[derive(Error, Debug, PartialEq)]
pub enum NormalizeError {
    #[error("Malformed URL: {0}")]
    Malformed(#[from] url::ParseError),

    #[error("Cross-origin link to {host}")]
    CrossOrigin { host: String },

    #[error("URL has no host")]
    NoHost,
}

pub type Result<T> = std::result::Result<T, ScanError>;
