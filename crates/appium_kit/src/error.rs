/// Error types for Appium session operations
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppiumError {
    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(String),

    #[error("Element not found: {locator} ({strategy}), Error: {message}")]
    ElementNotFound {
        strategy: String,
        locator: String,
        message: String,
    },

    #[error("Unknown locator strategy: {0}")]
    UnknownStrategy(String),

    #[error("No element or complete (strategy, locator) pair was given")]
    MissingTarget,

    #[error("Session not started: call start_session first")]
    SessionNotStarted,

    #[error("Remote error ({error}): {message}")]
    WebDriver { error: String, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Base64 decode error: {0}")]
    Base64Decode(#[from] base64::DecodeError),
}

pub type Result<T> = std::result::Result<T, AppiumError>;
