use thiserror::Error;

#[derive(Error, Debug)]
pub enum WatcherError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    // Network errors
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected HTTP status: {0}")]
    Status(reqwest::StatusCode),

    // Parsing errors
    #[error("Response parsing failed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Webhook errors from the webhook library
    #[error("Webhook error: {0}")]
    Webhook(String),
}

impl From<webhook::WebhookError> for WatcherError {
    fn from(err: webhook::WebhookError) -> Self {
        WatcherError::Webhook(err.to_string())
    }
}

pub type WatcherResult<T> = Result<T, WatcherError>;
