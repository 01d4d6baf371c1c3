// Error types for the travel site API

use axum::http::StatusCode;
use thiserror::Error;

use crate::envelope::ErrorCode;

// Domain errors a handler can answer with. Each maps to an envelope error code
// and the HTTP status the handler responds with.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Package not found")]
    PackageNotFound(String),

    #[error("Transaction ID is required")]
    MissingTransactionId,
}

impl ApiError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ApiError::PackageNotFound(_) => ErrorCode::NotFound,
            ApiError::MissingTransactionId => ErrorCode::MissingTransactionId,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::PackageNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MissingTransactionId => StatusCode::BAD_REQUEST,
        }
    }
}

// Errors raised while loading the static tables at startup
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON parse error in {table}: {message}")]
    JsonParse { table: &'static str, message: String },

    #[error("Duplicate id {id} in {table}")]
    DuplicateId { table: &'static str, id: String },
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value} ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_and_status_mapping() {
        let not_found = ApiError::PackageNotFound("pkg-x".to_string());
        assert_eq!(not_found.code(), ErrorCode::NotFound);
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);
        assert_eq!(not_found.to_string(), "Package not found");

        let missing = ApiError::MissingTransactionId;
        assert_eq!(missing.code(), ErrorCode::MissingTransactionId);
        assert_eq!(missing.status(), StatusCode::BAD_REQUEST);
        assert_eq!(missing.to_string(), "Transaction ID is required");
    }
}
