use flowmap_scanner::ScanError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlowError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No pages found at {start_url}")]
    EmptyResult { start_url: String },

    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl FlowError {
    /// An empty crawl is a "nothing found" answer, not a failure.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, FlowError::EmptyResult { .. })
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            FlowError::InvalidInput(_) | FlowError::Scan(ScanError::InvalidInput(_))
        )
    }
}

pub type Result<T> = std::result::Result<T, FlowError>;
