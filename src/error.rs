use actix_web::http::StatusCode;
use std::error::Error as _;
use thiserror::Error;

use crate::store::StoreError;

/// Failure raised by the service layer. The message is fixed per operation;
/// the store error that caused it is kept as the source.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct AppError {
    message: &'static str,
    status: StatusCode,
    #[source]
    source: Option<StoreError>,
}

impl AppError {
    pub fn new(message: &'static str, status: StatusCode) -> Self {
        Self {
            message,
            status,
            source: None,
        }
    }

    pub fn internal(message: &'static str, source: StoreError) -> Self {
        Self {
            message,
            status: StatusCode::INTERNAL_SERVER_ERROR,
            source: Some(source),
        }
    }

    pub fn message(&self) -> &'static str {
        self.message
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Full cause chain, e.g. `Failed to fetch employee: database error: pool timed out`.
    pub fn detail(&self) -> String {
        let mut detail = self.message.to_string();
        let mut cause = self.source();
        while let Some(err) = cause {
            detail.push_str(": ");
            detail.push_str(&err.to_string());
            cause = err.source();
        }
        detail
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_walks_the_source_chain() {
        let err = AppError::internal(
            "Failed to update employee",
            StoreError::Database(sqlx::Error::PoolTimedOut),
        );
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Failed to update employee");
        assert!(err.detail().starts_with("Failed to update employee: database error"));
    }

    #[test]
    fn detail_without_source_is_the_message() {
        let err = AppError::new("Failed to fetch employees", StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.detail(), "Failed to fetch employees");
        assert_eq!(err.message(), "Failed to fetch employees");
    }
}
