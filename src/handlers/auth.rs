use axum::{extract::State, response::Json};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace};
use utoipa::ToSchema;
use validator::Validate;

use crate::auth::{self, AuthError};
use crate::error::ApiError;
use crate::handlers::accounts::AccountResponse;
use crate::schemas::{ApiResponse, AppState};

/// Request body for logging in
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    #[validate(email(message = "The email must be a valid email address."))]
    pub email: String,
    pub password: String,
}

/// Authenticate by email and password
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<AccountResponse>),
        (status = 401, description = "Invalid credentials", body = crate::schemas::ErrorResponse),
        (status = 403, description = "Account archived", body = crate::schemas::ErrorResponse),
        (status = 423, description = "Account locked", body = crate::schemas::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state, request))]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<ApiResponse<AccountResponse>>, AuthError> {
    trace!("Entering login handler");
    debug!("Login attempt for: {}", request.email);

    if let Err(validation) = request.validate() {
        // Malformed email can never match an account; report the same
        // stable outcome instead of leaking a different shape.
        debug!("Login request failed validation: {}", ApiError::from(validation));
        return Err(AuthError::InvalidCredentials);
    }

    let account = auth::authenticate(&state.db, &request.email, &request.password).await?;
    info!("Login successful for {}", account.email);

    Ok(Json(ApiResponse {
        data: account.into(),
        message: "Login successful".to_string(),
        success: true,
    }))
}
