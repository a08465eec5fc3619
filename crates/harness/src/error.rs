//! Error types for the verification harness

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("Browser session failed to start: {0}")]
    SessionStartup(String),

    #[error("Application not reachable after {attempts} attempts")]
    AppUnready { attempts: usize },

    #[error("No element matches selector: {selector}")]
    ElementNotFound { selector: String },

    #[error("Timed out after {elapsed_ms} ms waiting for: {selector}")]
    WaitTimeout { selector: String, elapsed_ms: u64 },

    #[error("Assertion failed: {description} (actual: {actual})")]
    AssertionFailed { description: String, actual: String },

    #[error("Driver error: {0}")]
    Driver(String),

    #[error("Driver process closed unexpectedly")]
    DriverClosed,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type HarnessResult<T> = Result<T, HarnessError>;
