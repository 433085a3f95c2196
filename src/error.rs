use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use sea_orm::DbErr;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::error;

use crate::schemas::ErrorResponse;

/// Field name -> list of human-readable messages, the shape the front end
/// renders next to form inputs.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Error taxonomy for the provisioning API.
///
/// `Validation` and `Conflict` carry field-level detail and map to 422;
/// conflicts are normalized to the same field-tagged shape whether they were
/// caught by a pre-check or by the store at commit time. Storage errors are
/// logged with context and surfaced as a generic 500, never as raw detail.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("validation failed")]
    Validation(FieldErrors),
    #[error("the {field} has already been taken")]
    Conflict { field: String },
    #[error("{0} not found")]
    NotFound(String),
    #[error("account is already archived")]
    AlreadyArchived,
    #[error("database error: {0}")]
    Storage(#[from] DbErr),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn conflict(field: &str) -> Self {
        ApiError::Conflict {
            field: field.to_string(),
        }
    }

    pub fn not_found(what: &str) -> Self {
        ApiError::NotFound(what.to_string())
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields = FieldErrors::new();
        for (field, errs) in errors.field_errors() {
            let messages = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("The {} field is invalid.", field))
                })
                .collect();
            fields.insert(field.to_string(), messages);
        }
        ApiError::Validation(fields)
    }
}

/// Translate a store-level uniqueness violation into the field-tagged
/// conflict it corresponds to. This is the commit-time fallback for the
/// race window left open by the uniqueness pre-checks: two concurrent
/// requests can both pass the pre-check, and the loser's constraint
/// violation must surface as the same field error the pre-check would
/// have produced.
pub fn translate_db_conflict(db_error: DbErr) -> ApiError {
    let message = db_error.to_string().to_lowercase();
    if message.contains("unique") || message.contains("constraint") {
        for field in ["student_id", "teacher_id", "email"] {
            if message.contains(field) {
                return ApiError::conflict(field);
            }
        }
        // Unique violation on a column we do not special-case.
        return ApiError::conflict("record");
    }
    ApiError::Storage(db_error)
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Validation(fields) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorResponse {
                    error: "The given data was invalid.".to_string(),
                    code: "VALIDATION_FAILED".to_string(),
                    success: false,
                    errors: Some(fields),
                },
            ),
            ApiError::Conflict { field } => {
                let mut fields = FieldErrors::new();
                fields.insert(
                    field.clone(),
                    vec![format!("The {} has already been taken.", field)],
                );
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    ErrorResponse {
                        error: format!("The {} has already been taken.", field),
                        code: "CONFLICT".to_string(),
                        success: false,
                        errors: Some(fields),
                    },
                )
            }
            ApiError::NotFound(what) => (
                StatusCode::NOT_FOUND,
                ErrorResponse {
                    error: format!("{} not found", what),
                    code: "NOT_FOUND".to_string(),
                    success: false,
                    errors: None,
                },
            ),
            ApiError::AlreadyArchived => (
                StatusCode::CONFLICT,
                ErrorResponse {
                    error: "Account is already archived".to_string(),
                    code: "ALREADY_ARCHIVED".to_string(),
                    success: false,
                    errors: None,
                },
            ),
            ApiError::Storage(db_error) => {
                error!("Unexpected database error: {}", db_error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "Internal server error".to_string(),
                        code: "DATABASE_ERROR".to_string(),
                        success: false,
                        errors: None,
                    },
                )
            }
            ApiError::Internal(detail) => {
                error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "Internal server error".to_string(),
                        code: "INTERNAL_ERROR".to_string(),
                        success: false,
                        errors: None,
                    },
                )
            }
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_violation_maps_to_field_conflict() {
        let err = DbErr::Custom(
            "UNIQUE constraint failed: student_profiles.student_id".to_string(),
        );
        match translate_db_conflict(err) {
            ApiError::Conflict { field } => assert_eq!(field, "student_id"),
            other => panic!("expected conflict, got {:?}", other),
        }
    }

    #[test]
    fn email_violation_maps_to_email_conflict() {
        let err = DbErr::Custom("UNIQUE constraint failed: accounts.email".to_string());
        match translate_db_conflict(err) {
            ApiError::Conflict { field } => assert_eq!(field, "email"),
            other => panic!("expected conflict, got {:?}", other),
        }
    }

    #[test]
    fn unrelated_error_stays_storage() {
        let err = DbErr::Custom("connection reset".to_string());
        assert!(matches!(translate_db_conflict(err), ApiError::Storage(_)));
    }
}
