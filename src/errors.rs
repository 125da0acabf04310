use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::domain::errors::QueryError;

/// Body of every error response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub message: String,
    #[serde(rename = "errorDetail", skip_serializing_if = "Option::is_none")]
    pub error_detail: Option<String>,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{message}")]
    Database {
        message: String,
        detail: Option<String>,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Read endpoints describe what failed and pass the driver message as
    /// detail.
    pub fn fetching(what: &str, e: QueryError) -> Self {
        match e {
            QueryError::Validation(msg) => AppError::BadRequest(msg),
            QueryError::Database { message, .. } => AppError::Database {
                message: format!("Error fetching {what}"),
                detail: Some(message),
            },
        }
    }
}

/// Write endpoints surface the driver message verbatim.
impl From<QueryError> for AppError {
    fn from(e: QueryError) -> Self {
        match e {
            QueryError::Validation(msg) => AppError::BadRequest(msg),
            QueryError::Database {
                message, detail, ..
            } => AppError::Database {
                detail: Some(detail.unwrap_or_else(|| message.clone())),
                message,
            },
        }
    }
}

impl From<actix_web::error::BlockingError> for AppError {
    fn from(e: actix_web::error::BlockingError) -> Self {
        AppError::Internal(e.to_string())
    }
}

impl AppError {
    fn body(&self) -> ErrorBody {
        match self {
            AppError::BadRequest(msg) => ErrorBody {
                message: msg.clone(),
                error_detail: None,
            },
            AppError::Database { message, detail } => ErrorBody {
                message: message.clone(),
                error_detail: detail.clone(),
            },
            AppError::Internal(_) => ErrorBody {
                message: "Internal server error.".to_string(),
                error_detail: None,
            },
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Database { .. } | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self.body())
    }
}
