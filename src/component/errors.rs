use thiserror::Error;

use crate::domain::table::ConfigurationError;

/// Failure of the single best-effort fetch issued for a request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("endpoint answered with status {0}")]
    Status(u16),
    #[error("malformed response body: {0}")]
    Decode(String),
    #[error("cannot encode request parameters: {0}")]
    Encode(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            FetchError::Status(status.as_u16())
        } else if err.is_decode() {
            FetchError::Decode(err.to_string())
        } else {
            FetchError::Transport(err.to_string())
        }
    }
}

/// Failure of a templating collaborator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("template error: {0}")]
    Template(String),
}

impl From<tera::Error> for RenderError {
    fn from(err: tera::Error) -> Self {
        // Tera nests the useful message in the source chain.
        let mut message = err.to_string();
        let mut source = std::error::Error::source(&err);
        while let Some(inner) = source {
            message.push_str(": ");
            message.push_str(&inner.to_string());
            source = inner.source();
        }
        RenderError::Template(message)
    }
}

#[derive(Debug, Error)]
pub enum ComponentError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("table component is no longer running")]
    Detached,
}

pub type ComponentResult<T> = Result<T, ComponentError>;
