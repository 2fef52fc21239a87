//! Unified error handling.
//!
//! Error variants are generated by a macro so each carries an error code and a type name.

use actix_web::{HttpResponse, http::StatusCode};
use std::fmt;

use crate::models::{ApiResponse, ErrorCode};

/// Defines the crate error enum.
///
/// Generates:
/// - the enum itself
/// - `code()` returning the error code
/// - `error_type()` returning the error type name
/// - `message()` returning the detail message
/// - snake_case constructors for every variant
macro_rules! define_spada_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum SpadaError {
            $($variant(String),)*
        }

        impl SpadaError {
            pub fn code(&self) -> &'static str {
                match self {
                    $(SpadaError::$variant(_) => $code,)*
                }
            }

            pub fn error_type(&self) -> &'static str {
                match self {
                    $(SpadaError::$variant(_) => $type_name,)*
                }
            }

            pub fn message(&self) -> &str {
                match self {
                    $(SpadaError::$variant(msg) => msg,)*
                }
            }
        }

        paste::paste! {
            impl SpadaError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        SpadaError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_spada_errors! {
    CacheConnection("E001", "Cache Connection Error"),
    CachePluginNotFound("E002", "Cache Plugin Not Found"),
    DatabaseConfig("E003", "Database Configuration Error"),
    DatabaseConnection("E004", "Database Connection Error"),
    DatabaseOperation("E005", "Database Operation Error"),
    FileOperation("E006", "File Operation Error"),
    Validation("E007", "Validation Error"),
    NotFound("E008", "Resource Not Found"),
    Serialization("E009", "Serialization Error"),
    DateParse("E010", "Date Parse Error"),
    Authentication("E011", "Authentication Error"),
    Authorization("E012", "Authorization Error"),
    Conflict("E013", "Conflict"),
    Upstream("E014", "Upstream Error"),
}

impl SpadaError {
    /// Colored output for development logs.
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// True when the error comes from a violated unique constraint.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            SpadaError::DatabaseOperation(msg) => {
                let msg = msg.to_ascii_lowercase();
                msg.contains("unique") || msg.contains("duplicate")
            }
            SpadaError::Conflict(_) => true,
            _ => false,
        }
    }
}

impl fmt::Display for SpadaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for SpadaError {}

impl From<sea_orm::DbErr> for SpadaError {
    fn from(err: sea_orm::DbErr) -> Self {
        SpadaError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for SpadaError {
    fn from(err: std::io::Error) -> Self {
        SpadaError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for SpadaError {
    fn from(err: serde_json::Error) -> Self {
        SpadaError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for SpadaError {
    fn from(err: chrono::ParseError) -> Self {
        SpadaError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SpadaError>;

/// Infrastructure failures reaching a handler become a generic 500; the detail is logged only.
impl actix_web::ResponseError for SpadaError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        tracing::error!("{}", self.format_simple());
        HttpResponse::InternalServerError().json(ApiResponse::error_empty(
            ErrorCode::InternalServerError,
            "Internal server error",
        ))
    }
}

/// A request rejected by business rules, rendered as the standard JSON envelope.
#[derive(Debug, Clone)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: ErrorCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    pub fn bad_request(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, code, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, ErrorCode::Unauthorized, message)
    }

    pub fn forbidden(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, code, message)
    }

    pub fn not_found(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, code, message)
    }

    pub fn conflict(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, code, message)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:?}): {}", self.status, self.code, self.message)
    }
}

impl actix_web::ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status)
            .json(ApiResponse::error_empty(self.code, self.message.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(SpadaError::cache_connection("test").code(), "E001");
        assert_eq!(SpadaError::database_config("test").code(), "E003");
        assert_eq!(SpadaError::validation("test").code(), "E007");
        assert_eq!(SpadaError::authentication("test").code(), "E011");
        assert_eq!(SpadaError::conflict("test").code(), "E013");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            SpadaError::cache_connection("test").error_type(),
            "Cache Connection Error"
        );
        assert_eq!(
            SpadaError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_error_message() {
        let err = SpadaError::validation("Invalid input");
        assert_eq!(err.message(), "Invalid input");
    }

    #[test]
    fn test_format_simple() {
        let err = SpadaError::validation("Invalid URL");
        let formatted = err.format_simple();
        assert!(formatted.contains("Validation Error"));
        assert!(formatted.contains("Invalid URL"));
    }

    #[test]
    fn test_unique_violation_detection() {
        let err = SpadaError::database_operation(
            "Execution Error: UNIQUE constraint failed: users.username",
        );
        assert!(err.is_unique_violation());
        assert!(SpadaError::conflict("taken").is_unique_violation());
        assert!(!SpadaError::not_found("missing").is_unique_violation());
    }

    #[test]
    fn test_api_error_response() {
        use actix_web::ResponseError;

        let err = ApiError::conflict(ErrorCode::ScheduleConflict, "overlap");
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert_eq!(err.error_response().status(), StatusCode::CONFLICT);
        assert_eq!(
            SpadaError::database_operation("boom").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: SpadaError = io.into();
        assert_eq!(err.code(), "E006");
    }
}
