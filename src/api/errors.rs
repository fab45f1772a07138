use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::api::validation::ValidationError;
use crate::domain::errors::GatewayError;

/// API error response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub success: bool,
    pub error: String,
    pub error_code: String,
    pub details: Option<serde_json::Value>,
    pub validation_errors: Option<Vec<ValidationError>>,
}

/// API error types with corresponding HTTP status codes
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    ValidationError(Vec<ValidationError>),
    NotFound(String),

    // Contract-specific errors
    GatewayError(GatewayError),
}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::GatewayError(gateway_error) => match gateway_error {
                GatewayError::NotConnected => StatusCode::SERVICE_UNAVAILABLE,
                GatewayError::NoSigner => StatusCode::SERVICE_UNAVAILABLE,
                GatewayError::InvalidAddress(_)
                | GatewayError::InvalidLevel(_)
                | GatewayError::InvalidMatrix(_) => StatusCode::BAD_REQUEST,
                GatewayError::Reverted { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                GatewayError::Rpc(_) | GatewayError::Transaction(_) => StatusCode::BAD_GATEWAY,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    /// Get the error code string for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::ValidationError(_) => "VALIDATION_ERROR",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::GatewayError(gateway_error) => match gateway_error {
                GatewayError::NotConnected => "NOT_CONNECTED",
                GatewayError::NoSigner => "NO_SIGNER",
                GatewayError::Reverted { .. } => "CALL_REVERTED",
                GatewayError::Rpc(_) => "RPC_ERROR",
                GatewayError::Transaction(_) => "TRANSACTION_ERROR",
                _ => "CONTRACT_ERROR",
            },
        }
    }

    /// Get the error message
    pub fn message(&self) -> String {
        match self {
            ApiError::BadRequest(msg) => msg.clone(),
            ApiError::ValidationError(errors) => {
                if errors.len() == 1 {
                    format!("Validation failed: {}", errors[0].message)
                } else {
                    format!("Validation failed with {} errors", errors.len())
                }
            },
            ApiError::NotFound(msg) => msg.clone(),
            ApiError::GatewayError(gateway_error) => format!("Contract error: {}", gateway_error),
        }
    }

    /// Create a bad request error with context
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    /// Create a not found error with context
    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();
        let message = self.message();

        let validation_errors = match &self {
            ApiError::ValidationError(errors) => Some(errors.clone()),
            _ => None,
        };

        let details = match &self {
            ApiError::GatewayError(gateway_error) => {
                Some(serde_json::json!({
                    "gateway_error_type": format!("{:?}", gateway_error)
                }))
            },
            _ => None,
        };

        let error_response = ApiErrorResponse {
            success: false,
            error: message,
            error_code: error_code.to_string(),
            details,
            validation_errors,
        };

        (status, Json(error_response)).into_response()
    }
}

impl From<GatewayError> for ApiError {
    fn from(error: GatewayError) -> Self {
        ApiError::GatewayError(error)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

impl From<Vec<ValidationError>> for ApiError {
    fn from(errors: Vec<ValidationError>) -> Self {
        ApiError::ValidationError(errors)
    }
}

impl From<ValidationError> for ApiError {
    fn from(error: ValidationError) -> Self {
        ApiError::ValidationError(vec![error])
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
