use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, BackupError>;

#[derive(Error, Debug)]
pub enum BackupError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{step} failed with status {status}")]
    UnexpectedStatus {
        step: &'static str,
        status: StatusCode,
    },

    #[error("no upload URL in provider response: {0}")]
    MissingUploadHref(String),

    #[error("content service returned an empty image")]
    EmptyImage,

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("progress template error: {0}")]
    Template(String),
}

impl From<indicatif::style::TemplateError> for BackupError {
    fn from(err: indicatif::style::TemplateError) -> Self {
        BackupError::Template(err.to_string())
    }
}
