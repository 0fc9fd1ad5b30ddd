//! Unified error handling for the directory and its callers.
//!
//! Every failure carries a stable machine code and a user-facing message so
//! an outer transport layer can map it without inspecting internals.

use domain::DomainError;
use thiserror::Error;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    // Resource errors
    #[error("Resource not found")]
    NotFound,

    #[error("{0} already exists")]
    Conflict(String),

    // Validation
    #[error("{0}")]
    Validation(String),

    // External service errors
    #[cfg(feature = "database")]
    #[error("Database error")]
    Database(sea_orm::DbErr),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

impl AppError {
    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound => "NOT_FOUND",
            AppError::Conflict(_) => "CONFLICT",
            AppError::Validation(_) => "VALIDATION_ERROR",
            #[cfg(feature = "database")]
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::Conflict(msg) => {
                if msg.ends_with("already exists") {
                    msg.clone()
                } else {
                    format!("{} already exists", msg)
                }
            }

            #[cfg(feature = "database")]
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "A database error occurred".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }

            _ => self.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::NotFound)
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, AppError::Conflict(_))
    }
}

// =============================================================================
// Database Error Classification
// =============================================================================

#[cfg(feature = "database")]
impl AppError {
    /// Classify a store error, naming `entity` when a unique constraint fires.
    ///
    /// Unique violations become `Conflict`, updates that matched no row become
    /// `NotFound`; every other failure is passed through as `Database`.
    pub fn from_db(err: sea_orm::DbErr, entity: &str) -> Self {
        if matches!(err, sea_orm::DbErr::RecordNotUpdated) {
            return AppError::NotFound;
        }

        match err.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(detail)) => {
                tracing::warn!(%detail, "unique constraint violated");
                AppError::conflict(entity)
            }
            _ => AppError::Database(err),
        }
    }
}

#[cfg(feature = "database")]
impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        AppError::from_db(err, "Record")
    }
}

// =============================================================================
// Domain Error Conversion
// =============================================================================

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => AppError::validation(msg),
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self) -> AppResult<T> {
        self.ok_or(AppError::NotFound)
    }
}

/// Convenience constructors
impl AppError {
    pub fn conflict(entity: impl Into<String>) -> Self {
        AppError::Conflict(entity.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        assert_eq!(AppError::NotFound.code(), "NOT_FOUND");
        assert_eq!(AppError::conflict("Email").code(), "CONFLICT");
        assert_eq!(AppError::validation("bad").code(), "VALIDATION_ERROR");
        assert_eq!(AppError::internal("boom").code(), "INTERNAL_ERROR");
    }

    #[test]
    fn conflict_message_is_not_duplicated() {
        assert_eq!(AppError::conflict("Email").user_message(), "Email already exists");
        assert_eq!(
            AppError::conflict("Email already exists").user_message(),
            "Email already exists"
        );
    }

    #[test]
    fn internal_message_hides_details() {
        let err = AppError::internal("connection string leaked");
        assert_eq!(err.user_message(), "An internal error occurred");
    }

    #[test]
    fn domain_validation_maps_to_app_validation() {
        assert!(matches!(
            AppError::from(DomainError::validation("Invalid email format")),
            AppError::Validation(msg) if msg == "Invalid email format"
        ));
    }

    #[test]
    fn option_ext_maps_none_to_not_found() {
        let missing: Option<u8> = None;
        assert!(missing.ok_or_not_found().unwrap_err().is_not_found());
        assert_eq!(Some(7).ok_or_not_found().unwrap(), 7);
    }

    #[cfg(feature = "database")]
    #[test]
    fn record_not_updated_is_not_found() {
        let err = AppError::from_db(sea_orm::DbErr::RecordNotUpdated, "Email");
        assert!(err.is_not_found());
    }

    #[cfg(feature = "database")]
    #[test]
    fn other_db_errors_pass_through() {
        let err = AppError::from(sea_orm::DbErr::Custom("pool timed out".into()));
        assert_eq!(err.code(), "DATABASE_ERROR");
        assert_eq!(err.user_message(), "A database error occurred");
    }
}
