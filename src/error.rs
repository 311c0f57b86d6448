use thiserror::Error;

/// Error returned from the binary entry point.
///
/// Carries the process exit code alongside a user-facing message.
#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

/// Run-level failures of the catalog → map pipeline.
///
/// Per-line and per-field problems never show up here; they degrade into
/// unknown fields or discarded records (see `io::normalize::FieldIssue`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    /// Fetching the catalog failed (transport error, timeout, bad status, unreadable file).
    #[error("Failed to fetch earthquake catalog: {0}")]
    Ingestion(String),
    /// The catalog text has no line starting with `Tarih`.
    #[error("Catalog header line not found (expected a line starting with \"Tarih\").")]
    HeaderNotFound,
    /// Caller-supplied criteria are out of range.
    #[error("Invalid filter criteria: {0}")]
    InvalidCriteria(String),
    /// Writing the map document or an export failed.
    #[error("{0}")]
    Output(String),
}

impl PipelineError {
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::InvalidCriteria(_) | Self::Output(_) => 2,
            Self::Ingestion(_) | Self::HeaderNotFound => 4,
        }
    }
}

impl From<PipelineError> for AppError {
    fn from(err: PipelineError) -> Self {
        AppError::new(err.exit_code(), err.to_string())
    }
}
