use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Dataset not found")]
    NotFound,

    #[error("Dataset error: {0}")]
    DatasetError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl From<csv::Error> for RepositoryError {
    fn from(err: csv::Error) -> Self {
        match err.kind() {
            csv::ErrorKind::Io(io) if io.kind() == std::io::ErrorKind::NotFound => {
                RepositoryError::NotFound
            }
            csv::ErrorKind::Io(_) => RepositoryError::ConnectionError(format!("I/O error: {err}")),
            csv::ErrorKind::Utf8 { .. } => {
                RepositoryError::ValidationError(format!("Invalid UTF-8: {err}"))
            }
            csv::ErrorKind::UnequalLengths { .. } => {
                RepositoryError::ValidationError(format!("Malformed record: {err}"))
            }
            _ => RepositoryError::DatasetError(err.to_string()),
        }
    }
}
