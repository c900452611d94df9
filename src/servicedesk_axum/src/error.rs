use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use servicedesk_adapters::handlers::HandlerError;
use servicedesk_application::{AccountError, CheckInstallmentsError, FieldError};
use servicedesk_core::InstallmentError;
use thiserror::Error;

const GENERIC_ERROR: &str = "An error occurred";

#[derive(Debug, Serialize, Deserialize)]
pub struct FieldErrorResponse {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldErrorResponse>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GatewayErrorResponse {
    pub error: String,
    pub retryable: bool,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    #[error("{message}")]
    Conflict {
        field: &'static str,
        message: String,
    },

    #[error("{message}")]
    BadRequest {
        field: Option<&'static str>,
        message: String,
    },

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{message}")]
    Gateway { message: String, retryable: bool },

    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, fields) = match self {
            ApiError::Validation(fields) => (
                StatusCode::BAD_REQUEST,
                "Validation failed".to_string(),
                fields,
            ),
            ApiError::Conflict { field, message } => (
                StatusCode::CONFLICT,
                message.clone(),
                vec![FieldError::new(field, message)],
            ),
            ApiError::BadRequest { field, message } => {
                let fields = field
                    .map(|field| vec![FieldError::new(field, message.clone())])
                    .unwrap_or_default();
                (StatusCode::BAD_REQUEST, message, fields)
            }
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message, Vec::new()),
            ApiError::Unauthorized(message) => (StatusCode::UNAUTHORIZED, message, Vec::new()),
            ApiError::Gateway { message, retryable } => {
                let body = Json(GatewayErrorResponse {
                    error: message,
                    retryable,
                });
                return (StatusCode::BAD_GATEWAY, body).into_response();
            }
            ApiError::UnexpectedError(details) => {
                tracing::error!(error = %details, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    GENERIC_ERROR.to_string(),
                    Vec::new(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error,
            fields: fields
                .into_iter()
                .map(|f| FieldErrorResponse {
                    field: f.field,
                    message: f.message,
                })
                .collect(),
        });

        (status, body).into_response()
    }
}

impl From<AccountError> for ApiError {
    fn from(error: AccountError) -> Self {
        let field = error.field();
        match error {
            AccountError::Validation(fields) => ApiError::Validation(fields),
            AccountError::DuplicateUsername | AccountError::DuplicateEmail => ApiError::Conflict {
                field: field.unwrap_or_default(),
                message: error.to_string(),
            },
            AccountError::CredentialMismatch
            | AccountError::TokenInvalidOrExpired
            | AccountError::ResetPasswordFailed(_) => ApiError::BadRequest {
                field,
                message: error.to_string(),
            },
            AccountError::UserNotFound => ApiError::NotFound(error.to_string()),
            AccountError::UnknownPersistenceError(_) | AccountError::Notification(_) => {
                ApiError::UnexpectedError(error.to_string())
            }
        }
    }
}

impl From<CheckInstallmentsError> for ApiError {
    fn from(error: CheckInstallmentsError) -> Self {
        match error {
            CheckInstallmentsError::Validation(e) => {
                let field = match e {
                    InstallmentError::InvalidPrice(_) => "price",
                    InstallmentError::BinTooShort | InstallmentError::BinNotNumeric => "binNumber",
                };
                ApiError::BadRequest {
                    field: Some(field),
                    message: e.to_string(),
                }
            }
            CheckInstallmentsError::Gateway(e) => {
                tracing::warn!(error = %e, "Installment lookup failed");
                ApiError::Gateway {
                    retryable: e.is_retryable(),
                    message: e.to_string(),
                }
            }
        }
    }
}

impl From<HandlerError> for ApiError {
    fn from(error: HandlerError) -> Self {
        match error {
            HandlerError::Account(e) => e.into(),
            HandlerError::Installments(e) => e.into(),
            HandlerError::Session(e) => ApiError::UnexpectedError(e.to_string()),
            HandlerError::UserNotLoaded(_) => ApiError::NotFound(error.to_string()),
            HandlerError::InvalidCredentials => ApiError::Unauthorized(error.to_string()),
            HandlerError::BadRequest => ApiError::BadRequest {
                field: None,
                message: error.to_string(),
            },
        }
    }
}
