use thiserror::Error;

#[derive(Debug, Error)]
pub enum FlashError {
    #[error("Invalid page fixture: {0}")]
    InvalidPage(String),

    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    /// Non-success HTTP status; `message` is what the server said went wrong
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid JSON response: {0}")]
    Parse(String),

    #[error("Invalid request header: {0}")]
    Header(String),

    #[error("Request cancelled")]
    Cancelled,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl FlashError {
    /// Text suitable for a user-facing banner
    pub fn user_message(&self) -> String {
        match self {
            FlashError::Http { message, .. } => message.clone(),
            FlashError::Network(message) | FlashError::Parse(message) => message.clone(),
            other => other.to_string(),
        }
    }
}
