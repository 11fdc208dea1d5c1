use habitpro_types::{ContactStoreError, FieldErrors};
use thiserror::Error;

/// Application-wide error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Contact store error: {0}")]
    Store(#[from] ContactStoreError),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    #[error("Invalid submission")]
    Validation(FieldErrors),

    #[error("Details already submitted")]
    AlreadySubmitted,

    #[error("Contact store client is not available")]
    StoreUnavailable,
}

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Convert AppError to HTTP status codes for web responses
impl AppError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            Self::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Store(ContactStoreError::Unauthorized(_)) => StatusCode::FORBIDDEN,
            Self::Store(_) => StatusCode::BAD_GATEWAY,
            Self::Template(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::AlreadySubmitted => StatusCode::CONFLICT,
            Self::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        let mut body = serde_json::json!({
            "error": self.to_string(),
            "code": status.as_u16()
        });
        if let Self::Validation(fields) = &self {
            body["fields"] = serde_json::json!({
                "email": fields.email.map(|e| e.to_string()),
                "mobile": fields.mobile.map(|e| e.to_string()),
            });
        }
        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::Store(ContactStoreError::Unreachable("down".into())).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AppError::Validation(FieldErrors::default()).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(AppError::AlreadySubmitted.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            AppError::StoreUnavailable.status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
