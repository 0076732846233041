// utils/error.rs
use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // Erreurs d'authentification
    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Missing user ID in token")]
    MissingSubject,

    #[error("Email or Password is incorrect")]
    InvalidCredentials,

    #[error("Account is not active")]
    InactiveAccount,

    #[error("User's account is not active")]
    InactiveUser,

    #[error("You do not have permission to access this resource")]
    Forbidden,

    // Erreurs utilisateur
    #[error("User not found")]
    UserNotFound,

    #[error("User already exists")]
    UserAlreadyExists,

    // Erreurs de données
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),

    // Erreurs de ressources
    #[error("{0} not found")]
    NotFound(String),

    #[error("{0} already exists")]
    AlreadyExists(String),

    // Erreurs d'infrastructure
    #[error("Database error: {0}")]
    Database(String),

    #[error("Cache error: {0}")]
    Cache(String),

    #[error("Password hash error: {0}")]
    PasswordHash(String),

    #[error("Token error: {0}")]
    Token(String),

    #[error("Internal server error")]
    Internal,
}

impl AppError {
    /// Code machine renvoyé avec chaque erreur
    pub fn code(&self) -> &'static str {
        match self.status_code() {
            StatusCode::BAD_REQUEST => "BAD_REQUEST",
            StatusCode::UNAUTHORIZED => "UNAUTHORIZED",
            StatusCode::FORBIDDEN => "FORBIDDEN",
            StatusCode::NOT_FOUND => "NOT_FOUND",
            StatusCode::CONFLICT => "CONFLICT",
            StatusCode::UNPROCESSABLE_ENTITY => "UNPROCESSABLE_ENTITY",
            _ => "INTERNAL_ERROR",
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            // 400 - Bad Request
            AppError::InvalidToken => StatusCode::BAD_REQUEST,

            // 401 - Unauthorized
            AppError::NotAuthenticated
            | AppError::MissingSubject
            | AppError::InvalidCredentials
            | AppError::UserNotFound => StatusCode::UNAUTHORIZED,

            // 403 - Forbidden
            AppError::InactiveAccount | AppError::InactiveUser | AppError::Forbidden => {
                StatusCode::FORBIDDEN
            }

            // 404 - Not Found
            AppError::NotFound(_) => StatusCode::NOT_FOUND,

            // 409 - Conflict
            AppError::UserAlreadyExists | AppError::AlreadyExists(_) => StatusCode::CONFLICT,

            // 422 - Unprocessable Entity
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,

            // 500 - Internal Server Error
            AppError::Database(_)
            | AppError::Cache(_)
            | AppError::SerializeError(_)
            | AppError::PasswordHash(_)
            | AppError::Token(_)
            | AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        if status.is_server_error() {
            // Le détail reste dans les logs
            tracing::error!(error = %self, "Internal server error");
            return HttpResponse::build(status).json(json!({
                "detail": "Internal server error",
                "code": self.code()
            }));
        }

        let mut response = HttpResponse::build(status);
        if status == StatusCode::UNAUTHORIZED {
            response.insert_header(("WWW-Authenticate", "Bearer"));
        }

        response.json(json!({
            "detail": self.to_string(),
            "code": self.code()
        }))
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Database(err.to_string())
    }
}

impl From<redis::RedisError> for AppError {
    fn from(err: redis::RedisError) -> Self {
        AppError::Cache(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::SerializeError(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = err
            .field_errors()
            .iter()
            .map(|(field, errors)| {
                let error_messages: Vec<String> = errors
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    })
                    .collect();
                format!("{}: {}", field, error_messages.join(", "))
            })
            .collect();

        // Ordre stable pour les clients et les tests
        messages.sort();

        if messages.is_empty() {
            return AppError::Validation(err.to_string());
        }

        AppError::Validation(messages.join("; "))
    }
}

// Type de résultat standard
pub type Result<T> = std::result::Result<T, AppError>;
