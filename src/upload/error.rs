use reqwest::StatusCode;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to send request: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Upload failed with status: {0}")]
    Status(StatusCode),
}

#[derive(Debug, Error)]
pub enum PickError {
    #[error("Cannot read {}: {source}", path.display())]
    Metadata {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Not a regular file: {}", .0.display())]
    NotAFile(PathBuf),
}
