use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RibbitError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Template rendering failed: {0}")]
    RenderError(#[from] handlebars::RenderError),

    #[error("Template registration failed: {0}")]
    TemplateError(#[from] Box<handlebars::TemplateError>),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Bad request: {message}")]
    BadRequest { message: String },

    #[error("Not found: {what}")]
    NotFound { what: String },

    #[error("Already exists: {what}")]
    Conflict { what: String },

    #[error("Proof of work rejected")]
    InvalidProofOfWork,

    #[error("Proof of work error: {message}")]
    PowError { message: String },
}

impl From<handlebars::TemplateError> for RibbitError {
    fn from(value: handlebars::TemplateError) -> Self {
        Self::TemplateError(Box::new(value))
    }
}

impl RibbitError {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::BadRequest { .. } | Self::ValidationError { .. } | Self::InvalidProofOfWork => {
                StatusCode::BAD_REQUEST
            }
            Self::Conflict { .. } => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 面向使用者的訊息，不洩漏伺服器內部細節
    pub fn user_friendly_message(&self) -> String {
        match self.status_code() {
            StatusCode::INTERNAL_SERVER_ERROR => "Internal server error".to_string(),
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for RibbitError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("❌ Request failed: {:?}", self);
        } else {
            tracing::debug!("Request rejected ({}): {}", status, self);
        }
        (status, self.user_friendly_message()).into_response()
    }
}

pub type Result<T> = std::result::Result<T, RibbitError>;
