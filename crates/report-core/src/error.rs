use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Archive error: {0}")]
    ArchiveError(String),

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Chart error: {0}")]
    ChartError(String),

    #[error("Publish error: {0}")]
    PublishError(String),
}
