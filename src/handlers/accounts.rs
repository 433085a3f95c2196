use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use chrono::{DateTime, NaiveDate, Utc};
use model::entities::account::{self, Role};
use model::entities::prelude::Account;
use model::entities::{student_profile, teacher_profile};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace};
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::provision::{
    self, CreateAccountRequest, LockMode, ProfileKind, UpdateAccountRequest,
};
use crate::schemas::{AccountTotals, ApiResponse, AppState};

/// Account response model (credential hash omitted)
#[derive(Debug, Serialize, ToSchema)]
pub struct AccountResponse {
    pub id: i32,
    pub email: String,
    pub name: String,
    #[schema(value_type = String)]
    pub role: Role,
    pub is_locked: bool,
    pub archived: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<account::Model> for AccountResponse {
    fn from(model: account::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            name: model.name,
            role: model.role,
            is_locked: model.is_locked,
            archived: model.deleted_at.is_some(),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Student profile response model
#[derive(Debug, Serialize, ToSchema)]
pub struct StudentProfileResponse {
    pub id: i32,
    pub user_id: Option<i32>,
    pub student_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub course: Option<String>,
    pub status: String,
    pub enrollment_date: Option<NaiveDate>,
    pub year_level: Option<i32>,
}

impl From<student_profile::Model> for StudentProfileResponse {
    fn from(model: student_profile::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            student_id: model.student_id,
            first_name: model.first_name,
            last_name: model.last_name,
            email: model.email,
            phone: model.phone,
            course: model.course,
            status: model.status,
            enrollment_date: model.enrollment_date,
            year_level: model.year_level,
        }
    }
}

/// Teacher profile response model
#[derive(Debug, Serialize, ToSchema)]
pub struct TeacherProfileResponse {
    pub id: i32,
    pub user_id: Option<i32>,
    pub teacher_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub department: Option<String>,
    pub status: String,
    pub course_load: Option<i32>,
    pub position: Option<String>,
}

impl From<teacher_profile::Model> for TeacherProfileResponse {
    fn from(model: teacher_profile::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            teacher_id: model.teacher_id,
            first_name: model.first_name,
            last_name: model.last_name,
            email: model.email,
            department: model.department,
            status: model.status,
            course_load: model.course_load,
            position: model.position,
        }
    }
}

/// The role profile attached to an account, if any
#[derive(Debug, Serialize, ToSchema)]
#[serde(untagged)]
pub enum ProfileResponse {
    Student(StudentProfileResponse),
    Teacher(TeacherProfileResponse),
}

impl ProfileResponse {
    fn from_kind(kind: ProfileKind) -> Option<Self> {
        match kind {
            ProfileKind::Student(profile) => {
                Some(ProfileResponse::Student(profile.into()))
            }
            ProfileKind::Teacher(profile) => {
                Some(ProfileResponse::Teacher(profile.into()))
            }
            ProfileKind::None => None,
        }
    }
}

/// Response body for create/update operations: the account, its profile and
/// the refreshed dashboard totals
#[derive(Debug, Serialize, ToSchema)]
pub struct ProvisionResponse {
    pub account: AccountResponse,
    pub profile: Option<ProfileResponse>,
    pub totals: AccountTotals,
}

/// Response body for fetching a single account
#[derive(Debug, Serialize, ToSchema)]
pub struct AccountDetailResponse {
    pub account: AccountResponse,
    pub profile: Option<ProfileResponse>,
}

/// Query parameters for listing accounts
#[derive(Debug, Deserialize, ToSchema)]
pub struct ListAccountsQuery {
    /// Include archived accounts (default false)
    pub include_archived: Option<bool>,
    /// Restrict to one role
    #[schema(value_type = Option<String>)]
    pub role: Option<Role>,
}

/// Query parameters for deleting an account
#[derive(Debug, Deserialize, ToSchema)]
pub struct DeleteAccountQuery {
    /// 1 = permanently delete, 0/absent = archive
    pub force: Option<u8>,
}

/// Create a new account plus role profile
#[utoipa::path(
    post,
    path = "/api/v1/accounts",
    tag = "accounts",
    request_body = CreateAccountRequest,
    responses(
        (status = 200, description = "Account created successfully", body = ApiResponse<ProvisionResponse>),
        (status = 422, description = "Validation or uniqueness error", body = crate::schemas::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state, request))]
pub async fn create_account(
    State(state): State<AppState>,
    Json(request): Json<CreateAccountRequest>,
) -> Result<Json<ApiResponse<ProvisionResponse>>, ApiError> {
    trace!("Entering create_account handler");
    debug!("Creating account with email: {}", request.email);

    let outcome = provision::create_account(&state.db, &state.cache, request).await?;
    info!(
        "Account {} created with ID {}",
        outcome.account.email, outcome.account.id
    );

    Ok(Json(ApiResponse {
        data: ProvisionResponse {
            account: outcome.account.into(),
            profile: ProfileResponse::from_kind(outcome.profile),
            totals: outcome.totals,
        },
        message: "Account created successfully".to_string(),
        success: true,
    }))
}

/// Get all accounts
#[utoipa::path(
    get,
    path = "/api/v1/accounts",
    tag = "accounts",
    params(
        ("include_archived" = Option<bool>, Query, description = "Include archived accounts"),
        ("role" = Option<String>, Query, description = "Restrict to one role"),
    ),
    responses(
        (status = 200, description = "Accounts retrieved successfully", body = ApiResponse<Vec<AccountResponse>>),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_accounts(
    Query(query): Query<ListAccountsQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<AccountResponse>>>, ApiError> {
    trace!("Entering get_accounts handler");

    let mut select = Account::find().order_by_asc(account::Column::Id);
    if !query.include_archived.unwrap_or(false) {
        select = select.filter(account::Column::DeletedAt.is_null());
    }
    if let Some(role) = query.role {
        select = select.filter(account::Column::Role.eq(role));
    }

    let accounts = select.all(&state.db).await?;
    debug!("Retrieved {} accounts", accounts.len());

    let responses: Vec<AccountResponse> = accounts.into_iter().map(AccountResponse::from).collect();

    Ok(Json(ApiResponse {
        data: responses,
        message: "Accounts retrieved successfully".to_string(),
        success: true,
    }))
}

/// Get aggregate account totals for the dashboard
#[utoipa::path(
    get,
    path = "/api/v1/accounts/totals",
    tag = "accounts",
    responses(
        (status = 200, description = "Totals retrieved successfully", body = ApiResponse<AccountTotals>),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_account_totals(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<AccountTotals>>, ApiError> {
    trace!("Entering get_account_totals handler");

    let totals = provision::totals(&state.db, &state.cache).await?;

    Ok(Json(ApiResponse {
        data: totals,
        message: "Totals retrieved successfully".to_string(),
        success: true,
    }))
}

/// Get a specific account with its linked profile
#[utoipa::path(
    get,
    path = "/api/v1/accounts/{account_id}",
    tag = "accounts",
    params(
        ("account_id" = i32, Path, description = "Account ID"),
    ),
    responses(
        (status = 200, description = "Account retrieved successfully", body = ApiResponse<AccountDetailResponse>),
        (status = 404, description = "Account not found", body = crate::schemas::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_account(
    Path(account_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<AccountDetailResponse>>, ApiError> {
    trace!("Entering get_account handler for account_id: {}", account_id);

    let found = Account::find_by_id(account_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| ApiError::not_found("account"))?;
    let profile = provision::current_profile(&state.db, &found).await?;

    Ok(Json(ApiResponse {
        data: AccountDetailResponse {
            account: found.into(),
            profile: ProfileResponse::from_kind(profile),
        },
        message: "Account retrieved successfully".to_string(),
        success: true,
    }))
}

/// Partially update an account
#[utoipa::path(
    put,
    path = "/api/v1/accounts/{account_id}",
    tag = "accounts",
    params(
        ("account_id" = i32, Path, description = "Account ID"),
    ),
    request_body = UpdateAccountRequest,
    responses(
        (status = 200, description = "Account updated successfully", body = ApiResponse<ProvisionResponse>),
        (status = 404, description = "Account not found", body = crate::schemas::ErrorResponse),
        (status = 422, description = "Validation or uniqueness error", body = crate::schemas::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state, request))]
pub async fn update_account(
    Path(account_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<UpdateAccountRequest>,
) -> Result<Json<ApiResponse<ProvisionResponse>>, ApiError> {
    trace!("Entering update_account handler for account_id: {}", account_id);

    let outcome = provision::update_account(&state.db, &state.cache, account_id, request).await?;
    info!("Account {} updated", account_id);

    Ok(Json(ApiResponse {
        data: ProvisionResponse {
            account: outcome.account.into(),
            profile: ProfileResponse::from_kind(outcome.profile),
            totals: outcome.totals,
        },
        message: "Account updated successfully".to_string(),
        success: true,
    }))
}

/// Archive an account, or permanently delete it with ?force=1
#[utoipa::path(
    delete,
    path = "/api/v1/accounts/{account_id}",
    tag = "accounts",
    params(
        ("account_id" = i32, Path, description = "Account ID"),
        ("force" = Option<u8>, Query, description = "1 = permanently delete"),
    ),
    responses(
        (status = 200, description = "Account archived or deleted", body = ApiResponse<String>),
        (status = 404, description = "Account not found", body = crate::schemas::ErrorResponse),
        (status = 409, description = "Account already archived", body = crate::schemas::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_account(
    Path(account_id): Path<i32>,
    Query(query): Query<DeleteAccountQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, ApiError> {
    let force = query.force.unwrap_or(0) != 0;
    trace!(
        "Entering delete_account handler for account_id: {} (force: {})",
        account_id,
        force
    );

    let archived = provision::archive_account(&state.db, &state.cache, account_id, force).await?;
    let message = match archived {
        Some(_) => "Account archived successfully",
        None => "Account deleted permanently",
    };
    info!("Account {}: {}", account_id, message);

    Ok(Json(ApiResponse {
        data: format!("Account {}", account_id),
        message: message.to_string(),
        success: true,
    }))
}

/// Restore an archived account
#[utoipa::path(
    post,
    path = "/api/v1/accounts/{account_id}/restore",
    tag = "accounts",
    params(
        ("account_id" = i32, Path, description = "Account ID"),
    ),
    responses(
        (status = 200, description = "Account restored successfully", body = ApiResponse<AccountResponse>),
        (status = 404, description = "Account not found", body = crate::schemas::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn restore_account(
    Path(account_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<AccountResponse>>, ApiError> {
    trace!("Entering restore_account handler for account_id: {}", account_id);

    let restored = provision::restore_account(&state.db, &state.cache, account_id).await?;

    Ok(Json(ApiResponse {
        data: restored.into(),
        message: "Account restored successfully".to_string(),
        success: true,
    }))
}

/// Lock an account
#[utoipa::path(
    post,
    path = "/api/v1/accounts/{account_id}/lock",
    tag = "accounts",
    params(
        ("account_id" = i32, Path, description = "Account ID"),
    ),
    responses(
        (status = 200, description = "Account locked", body = ApiResponse<AccountResponse>),
        (status = 404, description = "Account not found", body = crate::schemas::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn lock_account(
    Path(account_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<AccountResponse>>, ApiError> {
    set_lock_response(state, account_id, LockMode::Lock, "Account locked").await
}

/// Unlock an account
#[utoipa::path(
    post,
    path = "/api/v1/accounts/{account_id}/unlock",
    tag = "accounts",
    params(
        ("account_id" = i32, Path, description = "Account ID"),
    ),
    responses(
        (status = 200, description = "Account unlocked", body = ApiResponse<AccountResponse>),
        (status = 404, description = "Account not found", body = crate::schemas::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn unlock_account(
    Path(account_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<AccountResponse>>, ApiError> {
    set_lock_response(state, account_id, LockMode::Unlock, "Account unlocked").await
}

/// Toggle an account's lock flag
#[utoipa::path(
    post,
    path = "/api/v1/accounts/{account_id}/toggle-lock",
    tag = "accounts",
    params(
        ("account_id" = i32, Path, description = "Account ID"),
    ),
    responses(
        (status = 200, description = "Account lock toggled", body = ApiResponse<AccountResponse>),
        (status = 404, description = "Account not found", body = crate::schemas::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn toggle_account_lock(
    Path(account_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<AccountResponse>>, ApiError> {
    set_lock_response(state, account_id, LockMode::Toggle, "Account lock toggled").await
}

async fn set_lock_response(
    state: AppState,
    account_id: i32,
    mode: LockMode,
    message: &str,
) -> Result<Json<ApiResponse<AccountResponse>>, ApiError> {
    let updated = provision::set_lock(&state.db, &state.cache, account_id, mode).await?;
    info!(
        "Account {} lock flag now {}",
        account_id, updated.is_locked
    );

    Ok(Json(ApiResponse {
        data: updated.into(),
        message: message.to_string(),
        success: true,
    }))
}
