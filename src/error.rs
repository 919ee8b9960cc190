use thiserror::Error;

#[derive(Error, Debug)]
pub enum JenkinsStateError {
    #[error("Invalid build number '{value}': expected a non-negative decimal integer")]
    InvalidBuildNumber { value: String },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, JenkinsStateError>;
