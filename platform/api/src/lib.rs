use std::sync::Arc;

use async_graphql::{Error, ErrorExtensions};
use thiserror::Error;

/// Shared GraphQL result type.
pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error, Clone)]
pub enum ApiError {
    #[error("resource not found: {0}")]
    NotFound(String),
    #[error("bad request: {0}")]
    InvalidInput(String),
    #[error("{0}")]
    Upstream(String),
    #[error("internal server error")]
    Internal(Arc<anyhow::Error>),
}

impl ApiError {
    fn code(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::InvalidInput(_) => "INVALID_INPUT",
            ApiError::Upstream(_) => "UPSTREAM_UNAVAILABLE",
            ApiError::Internal(_) => "INTERNAL",
        }
    }

    pub fn not_found(what: impl std::fmt::Display) -> Self {
        Self::NotFound(what.to_string())
    }

    pub fn invalid(message: impl std::fmt::Display) -> Self {
        Self::InvalidInput(message.to_string())
    }

    pub fn upstream(err: impl std::fmt::Display) -> Self {
        Self::Upstream(err.to_string())
    }

    pub fn internal(err: anyhow::Error) -> Self {
        Self::Internal(Arc::new(err))
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(value: anyhow::Error) -> Self {
        Self::internal(value)
    }
}

impl ErrorExtensions for ApiError {
    fn extend(&self) -> Error {
        if let ApiError::Internal(inner) = self {
            tracing::error!(error = %inner, "internal error while resolving request");
        }
        let mut err = Error::new(self.to_string());
        err = err.extend_with(|_err, e| {
            e.set("code", self.code());
        });
        if let ApiError::InvalidInput(_) = self {
            err = err.extend_with(|_err, e| {
                e.set("type", "BAD_REQUEST");
            });
        }
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_graphql::Value;

    fn code_of(err: &Error) -> Option<Value> {
        err.extensions
            .as_ref()
            .and_then(|map| map.get("code"))
            .cloned()
    }

    #[test]
    fn internal_errors_are_masked() {
        let err = ApiError::from(anyhow::anyhow!("seed table missing")).extend();
        assert_eq!(err.message, "internal server error");
        assert_eq!(code_of(&err), Some(Value::from("INTERNAL")));
    }

    #[test]
    fn invalid_input_keeps_its_reason() {
        let err = ApiError::invalid("unknown sort field `salary`").extend();
        assert_eq!(err.message, "bad request: unknown sort field `salary`");
        assert_eq!(code_of(&err), Some(Value::from("INVALID_INPUT")));
    }

    #[test]
    fn not_found_names_the_resource() {
        let err = ApiError::not_found("employee group 42").extend();
        assert_eq!(err.message, "resource not found: employee group 42");
        assert_eq!(code_of(&err), Some(Value::from("NOT_FOUND")));
    }

    #[test]
    fn upstream_failures_surface_the_provider_message() {
        let err = ApiError::upstream("failed to load employee data (HTTP 503)").extend();
        assert_eq!(err.message, "failed to load employee data (HTTP 503)");
        assert_eq!(code_of(&err), Some(Value::from("UPSTREAM_UNAVAILABLE")));
    }
}
