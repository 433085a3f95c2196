use moka::future::Cache;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

use crate::error::FieldErrors;

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection
    pub db: DatabaseConnection,
    /// Cache for dashboard aggregates, invalidated on every account mutation
    pub cache: Cache<String, CachedData>,
}

/// Cached data types
#[derive(Clone, Debug)]
pub enum CachedData {
    Totals(AccountTotals),
}

/// Aggregate account counts returned alongside provisioning results so the
/// dashboard can refresh without extra round trips.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct AccountTotals {
    /// Active (non-archived) student accounts
    pub total_students: u64,
    /// Active (non-archived) teacher accounts
    pub total_teachers: u64,
    /// Locked accounts
    pub locked: u64,
    /// Archived accounts
    pub archived: u64,
}

/// API response wrapper
#[derive(Serialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success status
    pub success: bool,
}

/// Error response
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
    /// Field-level messages for validation and conflict errors
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub errors: Option<FieldErrors>,
}

/// Health check response
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Database connection status
    pub database: String,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::accounts::create_account,
        crate::handlers::accounts::get_accounts,
        crate::handlers::accounts::get_account,
        crate::handlers::accounts::get_account_totals,
        crate::handlers::accounts::update_account,
        crate::handlers::accounts::delete_account,
        crate::handlers::accounts::restore_account,
        crate::handlers::accounts::lock_account,
        crate::handlers::accounts::unlock_account,
        crate::handlers::accounts::toggle_account_lock,
        crate::handlers::auth::login,
        crate::handlers::activity::get_activity,
    ),
    components(
        schemas(
            ApiResponse<crate::handlers::accounts::ProvisionResponse>,
            ApiResponse<crate::handlers::accounts::AccountDetailResponse>,
            ApiResponse<crate::handlers::accounts::AccountResponse>,
            ApiResponse<Vec<crate::handlers::accounts::AccountResponse>>,
            ApiResponse<Vec<crate::handlers::activity::ActivityResponse>>,
            ApiResponse<AccountTotals>,
            ApiResponse<String>,
            ErrorResponse,
            HealthResponse,
            AccountTotals,
            crate::provision::CreateAccountRequest,
            crate::provision::UpdateAccountRequest,
            crate::provision::StudentFields,
            crate::provision::TeacherFields,
            crate::handlers::accounts::AccountResponse,
            crate::handlers::accounts::StudentProfileResponse,
            crate::handlers::accounts::TeacherProfileResponse,
            crate::handlers::accounts::ProfileResponse,
            crate::handlers::accounts::ProvisionResponse,
            crate::handlers::accounts::AccountDetailResponse,
            crate::handlers::auth::LoginRequest,
            crate::handlers::activity::ActivityResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "accounts", description = "Account provisioning endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "activity", description = "Activity log endpoints"),
    ),
    info(
        title = "ClassTrack API",
        description = "School management API - accounts, role profiles and provisioning",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
