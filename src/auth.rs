use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use model::entities::{account, prelude::Account};
use pbkdf2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use pbkdf2::Pbkdf2;
use rand_core::OsRng;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::schemas::ErrorResponse;

/// Authentication failure modes. Each maps to a distinct, stable message so
/// the front end can branch on the outcome instead of parsing free text.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("this account has been archived")]
    Archived,
    #[error("this account is locked")]
    Locked,
    #[error("database error: {0}")]
    Storage(#[from] DbErr),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, error, code) = match self {
            AuthError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "Invalid email or password".to_string(),
                "INVALID_CREDENTIALS",
            ),
            AuthError::Archived => (
                StatusCode::FORBIDDEN,
                "This account has been archived".to_string(),
                "ACCOUNT_ARCHIVED",
            ),
            AuthError::Locked => (
                StatusCode::LOCKED,
                "This account is locked".to_string(),
                "ACCOUNT_LOCKED",
            ),
            AuthError::Storage(db_error) => {
                error!("Authentication storage error: {}", db_error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    "DATABASE_ERROR",
                )
            }
        };
        let body = ErrorResponse {
            error,
            code: code.to_string(),
            success: false,
            errors: None,
        };
        (status, Json(body)).into_response()
    }
}

/// Hash a password with PBKDF2 and a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, pbkdf2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Pbkdf2
        .hash_password(password.as_bytes(), &salt)?
        .to_string())
}

/// True when the stored credential is not a parseable PHC hash and must be
/// re-hashed on the next successful verification.
pub fn needs_rehash(stored: &str) -> bool {
    PasswordHash::new(stored).is_err()
}

/// Verify `password` against a stored credential.
///
/// Supports one legacy transparent upgrade: a stored plain-text credential
/// that string-matches the input verifies once; the caller is expected to
/// re-hash it immediately (see `authenticate`).
pub fn verify_password(password: &str, stored: &str) -> bool {
    match PasswordHash::new(stored) {
        Ok(parsed) => Pbkdf2.verify_password(password.as_bytes(), &parsed).is_ok(),
        // Legacy credential imported as plain text.
        Err(_) => stored == password,
    }
}

/// Authenticate by email + password.
///
/// Returns the account iff it exists, is not archived, the password
/// verifies, and the account is not locked -- checked in that order so each
/// failure mode surfaces its own outcome.
pub async fn authenticate(
    db: &DatabaseConnection,
    email: &str,
    password: &str,
) -> Result<account::Model, AuthError> {
    debug!("Authenticating {}", email);

    let found = Account::find()
        .filter(account::Column::Email.eq(email))
        .one(db)
        .await?;

    let Some(found) = found else {
        debug!("No account for {}", email);
        return Err(AuthError::InvalidCredentials);
    };

    if found.is_archived() {
        warn!("Login attempt on archived account {}", email);
        return Err(AuthError::Archived);
    }

    if !verify_password(password, &found.password_hash) {
        debug!("Password mismatch for {}", email);
        return Err(AuthError::InvalidCredentials);
    }

    if found.is_locked {
        warn!("Login attempt on locked account {}", email);
        return Err(AuthError::Locked);
    }

    // Transparent upgrade of legacy plain-text credentials.
    if needs_rehash(&found.password_hash) {
        match hash_password(password) {
            Ok(rehashed) => {
                let mut active: account::ActiveModel = found.clone().into();
                active.password_hash = Set(rehashed);
                active.updated_at = Set(chrono::Utc::now());
                match active.update(db).await {
                    Ok(updated) => {
                        info!("Upgraded legacy credential for {}", email);
                        return Ok(updated);
                    }
                    Err(db_error) => {
                        // The login itself succeeded; keep it that way.
                        warn!("Failed to persist rehashed credential for {}: {}", email, db_error);
                    }
                }
            }
            Err(hash_error) => {
                warn!("Failed to rehash legacy credential for {}: {}", email, hash_error);
            }
        }
    }

    Ok(found)
}
