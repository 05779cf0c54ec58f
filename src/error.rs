//! Error types for the REST API.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use sea_orm::DbErr;
use serde::Serialize;
use tracing::error;

use crate::db::context::PersistError;
use crate::utils::validation::FieldErrors;

/// Corps "problem" (RFC 7807) des erreurs 500.
#[derive(Debug, Serialize)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub problem_type: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Champs manquants ou invalides.
    #[error("validation failed on {} field(s)", .0.len())]
    Validation(FieldErrors),

    /// L'identifiant du chemin ne correspond pas à celui du corps.
    #[error("path id {path} does not match body id {body}")]
    IdMismatch { path: i32, body: i32 },

    #[error("resource not found")]
    NotFound,

    #[error("User not found")]
    UserNotFound,

    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Jeton absent ou invalide.
    #[error("authentication required: {0}")]
    Unauthorized(String),

    #[error("missing role {0}")]
    Forbidden(&'static str),

    /// Conflit de concurrence optimiste sur une ligne toujours présente.
    #[error("concurrency conflict on row {0}")]
    Conflict(i32),

    /// Échec d'une opération du sous-système d'identité.
    #[error("{title}: {detail}")]
    Problem { title: String, detail: String },

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn problem(title: &str, detail: impl Into<String>) -> Self {
        ApiError::Problem {
            title: title.to_string(),
            detail: detail.into(),
        }
    }

    fn problem_response(&self, title: &str, detail: String) -> HttpResponse {
        let status = self.status_code();
        let body = ProblemDetails {
            problem_type: "https://tools.ietf.org/html/rfc9110#section-15.6.1".to_string(),
            title: title.to_string(),
            status: status.as_u16(),
            detail,
        };

        HttpResponse::build(status)
            .content_type("application/problem+json")
            .json(body)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::IdMismatch { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound | ApiError::UserNotFound => StatusCode::NOT_FOUND,
            ApiError::InvalidCredentials | ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Problem { .. } | ApiError::Database(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::Validation(errors) => HttpResponse::BadRequest().json(errors),
            ApiError::IdMismatch { .. } => {
                let mut errors = FieldErrors::new();
                errors.insert("id".to_string(), vec![self.to_string()]);
                HttpResponse::BadRequest().json(errors)
            }
            ApiError::NotFound => HttpResponse::NotFound().finish(),
            ApiError::UserNotFound
            | ApiError::InvalidCredentials
            | ApiError::Forbidden(_)
            | ApiError::Conflict(_) => {
                HttpResponse::build(self.status_code()).json(serde_json::json!({
                    "error": self.to_string()
                }))
            }
            ApiError::Unauthorized(_) => HttpResponse::Unauthorized()
                .insert_header(("WWW-Authenticate", "Bearer"))
                .json(serde_json::json!({
                    "error": self.to_string()
                })),
            ApiError::Problem { title, detail } => self.problem_response(title, detail.clone()),
            ApiError::Database(e) => {
                error!(error = %e, "database failure");
                self.problem_response("Database error", e.to_string())
            }
            ApiError::Internal(detail) => {
                error!(%detail, "internal failure");
                self.problem_response("Internal server error", detail.clone())
            }
        }
    }
}

impl From<PersistError> for ApiError {
    fn from(err: PersistError) -> Self {
        match err {
            PersistError::Concurrency(id) => ApiError::Conflict(id),
            PersistError::Db(e) => ApiError::Database(e),
        }
    }
}
