//! Error taxonomy shared by the page handlers.
//!
//! Every failure is turned into a message on the page; nothing is allowed to
//! take the process down.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::delegates::StoreError;
use crate::outreach::GenerationError;
use crate::views;

#[derive(Debug, Error)]
pub enum AppError {
    /// Bad credentials or an invalid token. Causes are never distinguished.
    #[error("Invalid username or password")]
    Auth,
    #[error("{0}")]
    Generation(GenerationError),
    #[error("{0}")]
    Store(StoreError),
    #[error("{0}")]
    Validation(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Auth => StatusCode::UNAUTHORIZED,
            AppError::Generation(_) => StatusCode::BAD_GATEWAY,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    /// Text shown to the operator
    pub fn user_message(&self) -> String {
        match self {
            AppError::Auth => self.to_string(),
            AppError::Generation(_) => {
                "Failed to generate email. Check backend logs or API keys.".to_string()
            }
            AppError::Store(e) => format!("Error accessing the delegate list: {e}"),
            AppError::Validation(msg) => msg.clone(),
        }
    }

    pub fn log(&self) {
        match self {
            AppError::Auth => tracing::warn!(error_type = "auth", "Rejected login"),
            AppError::Generation(e) => tracing::error!(error_type = "generation", error = %e, "Message generation failed"),
            AppError::Store(e) => tracing::error!(error_type = "store_io", error = %e, "Delegate store failure"),
            AppError::Validation(msg) => tracing::warn!(error_type = "validation", message = %msg, "Rejected input"),
        }
    }
}

impl From<GenerationError> for AppError {
    fn from(e: GenerationError) -> Self {
        if e.is_validation() {
            AppError::Validation(e.to_string())
        } else {
            AppError::Generation(e)
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        if e.is_validation() {
            AppError::Validation(e.to_string())
        } else {
            AppError::Store(e)
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.log();
        (self.status(), views::error_page(self.status(), &self.user_message())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_are_separated() {
        let err = AppError::from(StoreError::DuplicateName("Alex".to_string()));
        assert!(matches!(err, AppError::Validation(ref msg) if msg == "delegate 'Alex' already exists"));
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let err = AppError::from(GenerationError::MissingName);
        assert!(matches!(err, AppError::Validation(_)));

        let err = AppError::from(GenerationError::AllProvidersFailed {
            primary: "Ollama",
            secondary: "Groq",
        });
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            err.user_message(),
            "Failed to generate email. Check backend logs or API keys."
        );
    }
}
