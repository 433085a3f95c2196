//! Account provisioning: creation and maintenance of login accounts together
//! with their role-specific profile rows.
//!
//! Every mutation runs inside one transaction. Uniqueness is pre-checked
//! before the write to produce friendly field errors early, but the
//! pre-check is only a race-reduction measure: a conflicting concurrent
//! request can still lose at commit time, and the resulting store-level
//! violation is translated into the same field-tagged error
//! (`error::translate_db_conflict`).

use chrono::{NaiveDate, Utc};
use model::entities::account::Role;
use model::entities::prelude::{Account, StudentProfile, TeacherProfile};
use model::entities::{account, student_profile, teacher_profile};
use moka::future::Cache;
use rand::Rng;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    PaginatorTrait, QueryFilter, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use utoipa::ToSchema;
use validator::Validate;

use crate::audit;
use crate::auth;
use crate::error::{translate_db_conflict, ApiError};
use crate::helpers::names::{resolve_name, ResolvedName};
use crate::schemas::{AccountTotals, CachedData};

const TOTALS_CACHE_KEY: &str = "account_totals";

/// Student-specific provisioning fields. Unknown members are rejected
/// instead of silently dropped.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct StudentFields {
    /// External student identifier; generated (`STU-<random>`) when absent.
    pub student_id: Option<String>,
    pub phone: Option<String>,
    pub course: Option<String>,
    pub status: Option<String>,
    pub enrollment_date: Option<NaiveDate>,
    pub year_level: Option<i32>,
}

/// Teacher-specific provisioning fields.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct TeacherFields {
    /// External teacher identifier; generated (`TEA-<random>`) when absent.
    pub teacher_id: Option<String>,
    pub department: Option<String>,
    pub status: Option<String>,
    pub course_load: Option<i32>,
    pub position: Option<String>,
}

/// Request body for creating an account (plus role profile).
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateAccountRequest {
    /// Combined display name; split into first/last when the split fields
    /// are absent.
    pub name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[validate(email(message = "The email must be a valid email address."))]
    pub email: String,
    #[validate(length(min = 6, message = "The password must be at least 6 characters."))]
    pub password: String,
    #[schema(value_type = String, example = "student")]
    pub role: Role,
    pub student: Option<StudentFields>,
    pub teacher: Option<TeacherFields>,
}

/// Request body for partially updating an account. Omitted fields are left
/// unchanged.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateAccountRequest {
    pub name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[validate(email(message = "The email must be a valid email address."))]
    pub email: Option<String>,
    #[validate(length(min = 6, message = "The password must be at least 6 characters."))]
    pub password: Option<String>,
    #[schema(value_type = Option<String>)]
    pub role: Option<Role>,
    pub student: Option<StudentFields>,
    pub teacher: Option<TeacherFields>,
}

/// The profile attached to an account, tagged by role.
#[derive(Debug, Clone)]
pub enum ProfileKind {
    Student(student_profile::Model),
    Teacher(teacher_profile::Model),
    None,
}

/// Result of a create/update operation.
#[derive(Debug)]
pub struct ProvisionOutcome {
    pub account: account::Model,
    pub profile: ProfileKind,
    pub totals: AccountTotals,
}

/// Lock mutations accepted by `set_lock`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockMode {
    Lock,
    Unlock,
    Toggle,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn generate_student_id() -> String {
    format!("STU-{:05}", rand::thread_rng().gen_range(0..100_000))
}

fn generate_teacher_id() -> String {
    format!("TEA-{:05}", rand::thread_rng().gen_range(0..100_000))
}

/// Aggregate dashboard counts, cached read-through. Mutations call
/// `invalidate_totals` so the next read recomputes.
pub async fn totals(
    db: &DatabaseConnection,
    cache: &Cache<String, CachedData>,
) -> Result<AccountTotals, ApiError> {
    if let Some(CachedData::Totals(cached)) = cache.get(TOTALS_CACHE_KEY).await {
        debug!("Account totals served from cache");
        return Ok(cached);
    }

    let total_students = Account::find()
        .filter(account::Column::Role.eq(Role::Student))
        .filter(account::Column::DeletedAt.is_null())
        .count(db)
        .await?;
    let total_teachers = Account::find()
        .filter(account::Column::Role.eq(Role::Teacher))
        .filter(account::Column::DeletedAt.is_null())
        .count(db)
        .await?;
    let locked = Account::find()
        .filter(account::Column::IsLocked.eq(true))
        .count(db)
        .await?;
    let archived = Account::find()
        .filter(account::Column::DeletedAt.is_not_null())
        .count(db)
        .await?;

    let computed = AccountTotals {
        total_students,
        total_teachers,
        locked,
        archived,
    };
    cache
        .insert(
            TOTALS_CACHE_KEY.to_string(),
            CachedData::Totals(computed.clone()),
        )
        .await;
    Ok(computed)
}

async fn invalidate_totals(cache: &Cache<String, CachedData>) {
    cache.invalidate(TOTALS_CACHE_KEY).await;
}

/// The profile currently linked to `account`, according to its role.
pub async fn current_profile(
    db: &DatabaseConnection,
    account: &account::Model,
) -> Result<ProfileKind, ApiError> {
    match account.role {
        Role::Student => {
            let profile = StudentProfile::find()
                .filter(student_profile::Column::UserId.eq(account.id))
                .one(db)
                .await?;
            Ok(profile.map(ProfileKind::Student).unwrap_or(ProfileKind::None))
        }
        Role::Teacher => {
            let profile = TeacherProfile::find()
                .filter(teacher_profile::Column::UserId.eq(account.id))
                .one(db)
                .await?;
            Ok(profile.map(ProfileKind::Teacher).unwrap_or(ProfileKind::None))
        }
        Role::Admin => Ok(ProfileKind::None),
    }
}

/// Create an account and, for students and teachers, its profile row, in one
/// transaction.
pub async fn create_account(
    db: &DatabaseConnection,
    cache: &Cache<String, CachedData>,
    request: CreateAccountRequest,
) -> Result<ProvisionOutcome, ApiError> {
    request.validate()?;

    let resolved = resolve_name(
        request.role,
        request.name.as_deref(),
        request.first_name.as_deref(),
        request.last_name.as_deref(),
    );
    debug!(
        "Creating {:?} account {} ({})",
        request.role, request.email, resolved.display_name
    );

    // Uniqueness pre-checks. These produce friendly errors before any write;
    // the transaction below still guards against concurrent winners.
    if Account::find()
        .filter(account::Column::Email.eq(&request.email))
        .one(db)
        .await?
        .is_some()
    {
        return Err(ApiError::conflict("email"));
    }
    precheck_profile(db, &request.email, request.role, &request.student, &request.teacher, None)
        .await?;

    let password_hash =
        auth::hash_password(&request.password).map_err(|e| ApiError::Internal(e.to_string()))?;

    let txn = db.begin().await?;
    let written = write_account(&txn, &request, &resolved, password_hash).await;
    let (created, profile) = match written {
        Ok(pair) => pair,
        Err(api_error) => {
            if let Err(rollback_error) = txn.rollback().await {
                warn!("Rollback after failed create also failed: {}", rollback_error);
            }
            return Err(api_error);
        }
    };
    txn.commit().await.map_err(translate_db_conflict)?;

    info!("Created account {} (id {})", created.email, created.id);
    audit::record(
        db,
        "user_created",
        &created.email,
        format!("Created {:?} account {}", created.role, created.email),
    )
    .await;

    invalidate_totals(cache).await;
    let totals = totals(db, cache).await?;

    Ok(ProvisionOutcome {
        account: created,
        profile,
        totals,
    })
}

/// Partially update an account, re-linking the role profile as needed.
///
/// On a role change the new role's profile is created or adopted; the old
/// profile row is deliberately left in place (see DESIGN notes).
pub async fn update_account(
    db: &DatabaseConnection,
    cache: &Cache<String, CachedData>,
    id: i32,
    request: UpdateAccountRequest,
) -> Result<ProvisionOutcome, ApiError> {
    let existing = Account::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ApiError::not_found("account"))?;

    request.validate()?;

    let role = request.role.unwrap_or(existing.role);
    let email = request.email.clone().unwrap_or_else(|| existing.email.clone());

    // Backfill missing name parts from the currently linked profile, then
    // from the stored display name, before the placeholder rule applies.
    let (profile_first, profile_last) = match current_profile(db, &existing).await? {
        ProfileKind::Student(p) => (Some(p.first_name), Some(p.last_name)),
        ProfileKind::Teacher(p) => (Some(p.first_name), Some(p.last_name)),
        ProfileKind::None => (None, None),
    };
    let resolved = {
        let mut first = request.first_name.clone();
        let mut last = request.last_name.clone();
        let mut name = request.name.clone();
        if name.is_none() {
            if first.is_none() {
                first = profile_first;
            }
            if last.is_none() {
                last = profile_last;
            }
            if first.is_none() && last.is_none() {
                name = Some(existing.name.clone());
            }
        }
        resolve_name(role, name.as_deref(), first.as_deref(), last.as_deref())
    };

    // Pre-checks, excluding the record's own rows.
    if Account::find()
        .filter(account::Column::Email.eq(&email))
        .filter(account::Column::Id.ne(existing.id))
        .one(db)
        .await?
        .is_some()
    {
        return Err(ApiError::conflict("email"));
    }
    precheck_profile(db, &email, role, &request.student, &request.teacher, Some(existing.id))
        .await?;

    let password_hash = match &request.password {
        Some(password) => {
            Some(auth::hash_password(password).map_err(|e| ApiError::Internal(e.to_string()))?)
        }
        None => None,
    };

    let txn = db.begin().await?;
    let written = write_update(&txn, &existing, &request, role, &email, &resolved, password_hash)
        .await;
    let (updated, profile) = match written {
        Ok(pair) => pair,
        Err(api_error) => {
            if let Err(rollback_error) = txn.rollback().await {
                warn!("Rollback after failed update also failed: {}", rollback_error);
            }
            return Err(api_error);
        }
    };
    txn.commit().await.map_err(translate_db_conflict)?;

    info!("Updated account {} (id {})", updated.email, updated.id);
    audit::record(
        db,
        "user_updated",
        &updated.email,
        format!("Updated account {}", updated.email),
    )
    .await;

    invalidate_totals(cache).await;
    let totals = totals(db, cache).await?;

    Ok(ProvisionOutcome {
        account: updated,
        profile,
        totals,
    })
}

/// Archive (soft delete) or, with `force`, permanently delete an account.
///
/// Forced deletion removes any linked profile rows first on a best-effort
/// basis: a profile that cannot be deleted is logged and skipped, and the
/// account removal proceeds regardless.
pub async fn archive_account(
    db: &DatabaseConnection,
    cache: &Cache<String, CachedData>,
    id: i32,
    force: bool,
) -> Result<Option<account::Model>, ApiError> {
    let existing = Account::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ApiError::not_found("account"))?;

    if !force {
        if existing.is_archived() {
            return Err(ApiError::AlreadyArchived);
        }
        let mut active: account::ActiveModel = existing.clone().into();
        active.deleted_at = Set(Some(Utc::now()));
        active.updated_at = Set(Utc::now());
        let archived = active.update(db).await?;

        info!("Archived account {} (id {})", archived.email, archived.id);
        audit::record(
            db,
            "user_archived",
            &archived.email,
            format!("Archived account {}", archived.email),
        )
        .await;
        invalidate_totals(cache).await;
        return Ok(Some(archived));
    }

    // Advisory profile cleanup, not transactional with the account delete.
    if let Err(db_error) = StudentProfile::delete_many()
        .filter(student_profile::Column::UserId.eq(existing.id))
        .exec(db)
        .await
    {
        warn!(
            "Failed to delete student profile for account {}: {}",
            existing.id, db_error
        );
    }
    if let Err(db_error) = TeacherProfile::delete_many()
        .filter(teacher_profile::Column::UserId.eq(existing.id))
        .exec(db)
        .await
    {
        warn!(
            "Failed to delete teacher profile for account {}: {}",
            existing.id, db_error
        );
    }

    Account::delete_by_id(existing.id).exec(db).await?;
    info!("Permanently deleted account {} (id {})", existing.email, existing.id);
    audit::record(
        db,
        "user_deleted",
        &existing.email,
        format!("Permanently deleted account {}", existing.email),
    )
    .await;
    invalidate_totals(cache).await;
    Ok(None)
}

/// Clear the archived marker.
pub async fn restore_account(
    db: &DatabaseConnection,
    cache: &Cache<String, CachedData>,
    id: i32,
) -> Result<account::Model, ApiError> {
    let existing = Account::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ApiError::not_found("account"))?;

    let mut active: account::ActiveModel = existing.into();
    active.deleted_at = Set(None);
    active.updated_at = Set(Utc::now());
    let restored = active.update(db).await?;

    info!("Restored account {} (id {})", restored.email, restored.id);
    audit::record(
        db,
        "user_restored",
        &restored.email,
        format!("Restored account {}", restored.email),
    )
    .await;
    invalidate_totals(cache).await;
    Ok(restored)
}

/// Flip or set the lock flag. Locked accounts are rejected at
/// authentication time.
pub async fn set_lock(
    db: &DatabaseConnection,
    cache: &Cache<String, CachedData>,
    id: i32,
    mode: LockMode,
) -> Result<account::Model, ApiError> {
    let existing = Account::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ApiError::not_found("account"))?;

    let locked = match mode {
        LockMode::Lock => true,
        LockMode::Unlock => false,
        LockMode::Toggle => !existing.is_locked,
    };
    let action = match mode {
        LockMode::Lock => "user_locked",
        LockMode::Unlock => "user_unlocked",
        LockMode::Toggle => "user_lock_toggled",
    };

    let mut active: account::ActiveModel = existing.into();
    active.is_locked = Set(locked);
    active.updated_at = Set(Utc::now());
    let updated = active.update(db).await?;

    info!(
        "Account {} (id {}) lock flag now {}",
        updated.email, updated.id, updated.is_locked
    );
    audit::record(
        db,
        action,
        &updated.email,
        format!("Account {} lock set to {}", updated.email, updated.is_locked),
    )
    .await;
    invalidate_totals(cache).await;
    Ok(updated)
}

/// Uniqueness pre-checks against the role profile tables. `own_account_id`
/// excludes rows already linked to the account being updated.
async fn precheck_profile(
    db: &DatabaseConnection,
    email: &str,
    role: Role,
    student: &Option<StudentFields>,
    teacher: &Option<TeacherFields>,
    own_account_id: Option<i32>,
) -> Result<(), ApiError> {
    let linked_elsewhere = |user_id: Option<i32>| match user_id {
        Some(owner) => own_account_id != Some(owner),
        None => false,
    };

    match role {
        Role::Student => {
            let fields = student.clone().unwrap_or_default();
            if let Some(sid) = non_blank(fields.student_id.as_deref()) {
                let found = StudentProfile::find()
                    .filter(student_profile::Column::StudentId.eq(sid))
                    .one(db)
                    .await?;
                if let Some(found) = found {
                    if linked_elsewhere(found.user_id) {
                        return Err(ApiError::conflict("student_id"));
                    }
                }
            }
            let found = StudentProfile::find()
                .filter(student_profile::Column::Email.eq(email))
                .one(db)
                .await?;
            if let Some(found) = found {
                if linked_elsewhere(found.user_id) {
                    return Err(ApiError::conflict("email"));
                }
            }
        }
        Role::Teacher => {
            let fields = teacher.clone().unwrap_or_default();
            if let Some(tid) = non_blank(fields.teacher_id.as_deref()) {
                let found = TeacherProfile::find()
                    .filter(teacher_profile::Column::TeacherId.eq(tid))
                    .one(db)
                    .await?;
                if let Some(found) = found {
                    if linked_elsewhere(found.user_id) {
                        return Err(ApiError::conflict("teacher_id"));
                    }
                }
            }
            let found = TeacherProfile::find()
                .filter(teacher_profile::Column::Email.eq(email))
                .one(db)
                .await?;
            if let Some(found) = found {
                if linked_elsewhere(found.user_id) {
                    return Err(ApiError::conflict("email"));
                }
            }
        }
        Role::Admin => {}
    }
    Ok(())
}

async fn write_account(
    txn: &DatabaseTransaction,
    request: &CreateAccountRequest,
    resolved: &ResolvedName,
    password_hash: String,
) -> Result<(account::Model, ProfileKind), ApiError> {
    let now = Utc::now();
    let created = account::ActiveModel {
        email: Set(request.email.clone()),
        password_hash: Set(password_hash),
        name: Set(resolved.display_name.clone()),
        role: Set(request.role),
        is_locked: Set(false),
        deleted_at: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(txn)
    .await
    .map_err(translate_db_conflict)?;

    let profile = match request.role {
        Role::Student => ProfileKind::Student(
            link_student_profile(
                txn,
                &created,
                resolved,
                request.student.clone().unwrap_or_default(),
            )
            .await?,
        ),
        Role::Teacher => ProfileKind::Teacher(
            link_teacher_profile(
                txn,
                &created,
                resolved,
                request.teacher.clone().unwrap_or_default(),
            )
            .await?,
        ),
        Role::Admin => ProfileKind::None,
    };

    Ok((created, profile))
}

async fn write_update(
    txn: &DatabaseTransaction,
    existing: &account::Model,
    request: &UpdateAccountRequest,
    role: Role,
    email: &str,
    resolved: &ResolvedName,
    password_hash: Option<String>,
) -> Result<(account::Model, ProfileKind), ApiError> {
    let mut active: account::ActiveModel = existing.clone().into();
    active.email = Set(email.to_string());
    if let Some(hash) = password_hash {
        active.password_hash = Set(hash);
    }
    active.name = Set(resolved.display_name.clone());
    active.role = Set(role);
    active.updated_at = Set(Utc::now());
    let updated = active.update(txn).await.map_err(translate_db_conflict)?;

    // On a role change the old profile row stays behind untouched; only the
    // new role's profile is created or adopted here.
    let profile = match role {
        Role::Student => ProfileKind::Student(
            link_student_profile(
                txn,
                &updated,
                resolved,
                request.student.clone().unwrap_or_default(),
            )
            .await?,
        ),
        Role::Teacher => ProfileKind::Teacher(
            link_teacher_profile(
                txn,
                &updated,
                resolved,
                request.teacher.clone().unwrap_or_default(),
            )
            .await?,
        ),
        Role::Admin => ProfileKind::None,
    };

    Ok((updated, profile))
}

/// Insert-or-adopt a student profile for `account`.
///
/// The row already linked via `user_id` always wins, so an account keeps at
/// most one profile across updates (an email or identifier change follows
/// the existing row instead of minting a second one). Otherwise a row
/// matched by supplied `student_id`, or failing that by the account email,
/// is adopted (fields overwritten, `user_id` claimed) if it is unlinked; a
/// row linked to a different account is a conflict on the field that
/// matched. With no match, a new row is inserted, generating an identifier
/// when none was supplied.
async fn link_student_profile(
    txn: &DatabaseTransaction,
    account: &account::Model,
    resolved: &ResolvedName,
    fields: StudentFields,
) -> Result<student_profile::Model, ApiError> {
    let supplied_id = non_blank(fields.student_id.as_deref()).map(str::to_string);

    let mut matched_field = "student_id";
    let mut candidate = StudentProfile::find()
        .filter(student_profile::Column::UserId.eq(account.id))
        .one(txn)
        .await
        .map_err(translate_db_conflict)?;
    if candidate.is_none() {
        candidate = match &supplied_id {
            Some(sid) => StudentProfile::find()
                .filter(student_profile::Column::StudentId.eq(sid.as_str()))
                .one(txn)
                .await
                .map_err(translate_db_conflict)?,
            None => None,
        };
    }
    if candidate.is_none() {
        matched_field = "email";
        candidate = StudentProfile::find()
            .filter(student_profile::Column::Email.eq(&account.email))
            .one(txn)
            .await
            .map_err(translate_db_conflict)?;
    }

    if let Some(found) = candidate {
        if let Some(owner) = found.user_id {
            if owner != account.id {
                debug!(
                    "Student profile {} already linked to account {}",
                    found.id, owner
                );
                return Err(ApiError::conflict(matched_field));
            }
        }
        let mut active: student_profile::ActiveModel = found.into();
        active.user_id = Set(Some(account.id));
        if let Some(sid) = &supplied_id {
            active.student_id = Set(sid.clone());
        }
        active.first_name = Set(resolved.first_name.clone());
        active.last_name = Set(resolved.last_name.clone());
        active.email = Set(account.email.clone());
        if let Some(phone) = fields.phone {
            active.phone = Set(Some(phone));
        }
        if let Some(course) = fields.course {
            active.course = Set(Some(course));
        }
        if let Some(status) = fields.status {
            active.status = Set(status);
        }
        if let Some(enrollment_date) = fields.enrollment_date {
            active.enrollment_date = Set(Some(enrollment_date));
        }
        if let Some(year_level) = fields.year_level {
            active.year_level = Set(Some(year_level));
        }
        return active.update(txn).await.map_err(translate_db_conflict);
    }

    let student_id = supplied_id.unwrap_or_else(generate_student_id);
    student_profile::ActiveModel {
        user_id: Set(Some(account.id)),
        student_id: Set(student_id),
        first_name: Set(resolved.first_name.clone()),
        last_name: Set(resolved.last_name.clone()),
        email: Set(account.email.clone()),
        phone: Set(fields.phone),
        course: Set(fields.course),
        status: Set(fields.status.unwrap_or_else(|| "active".to_string())),
        enrollment_date: Set(fields.enrollment_date),
        year_level: Set(fields.year_level),
        ..Default::default()
    }
    .insert(txn)
    .await
    .map_err(translate_db_conflict)
}

/// Insert-or-adopt a teacher profile. Same rules as the student variant.
async fn link_teacher_profile(
    txn: &DatabaseTransaction,
    account: &account::Model,
    resolved: &ResolvedName,
    fields: TeacherFields,
) -> Result<teacher_profile::Model, ApiError> {
    let supplied_id = non_blank(fields.teacher_id.as_deref()).map(str::to_string);

    let mut matched_field = "teacher_id";
    let mut candidate = TeacherProfile::find()
        .filter(teacher_profile::Column::UserId.eq(account.id))
        .one(txn)
        .await
        .map_err(translate_db_conflict)?;
    if candidate.is_none() {
        candidate = match &supplied_id {
            Some(tid) => TeacherProfile::find()
                .filter(teacher_profile::Column::TeacherId.eq(tid.as_str()))
                .one(txn)
                .await
                .map_err(translate_db_conflict)?,
            None => None,
        };
    }
    if candidate.is_none() {
        matched_field = "email";
        candidate = TeacherProfile::find()
            .filter(teacher_profile::Column::Email.eq(&account.email))
            .one(txn)
            .await
            .map_err(translate_db_conflict)?;
    }

    if let Some(found) = candidate {
        if let Some(owner) = found.user_id {
            if owner != account.id {
                debug!(
                    "Teacher profile {} already linked to account {}",
                    found.id, owner
                );
                return Err(ApiError::conflict(matched_field));
            }
        }
        let mut active: teacher_profile::ActiveModel = found.into();
        active.user_id = Set(Some(account.id));
        if let Some(tid) = &supplied_id {
            active.teacher_id = Set(tid.clone());
        }
        active.first_name = Set(resolved.first_name.clone());
        active.last_name = Set(resolved.last_name.clone());
        active.email = Set(account.email.clone());
        if let Some(department) = fields.department {
            active.department = Set(Some(department));
        }
        if let Some(status) = fields.status {
            active.status = Set(status);
        }
        if let Some(course_load) = fields.course_load {
            active.course_load = Set(Some(course_load));
        }
        if let Some(position) = fields.position {
            active.position = Set(Some(position));
        }
        return active.update(txn).await.map_err(translate_db_conflict);
    }

    let teacher_id = supplied_id.unwrap_or_else(generate_teacher_id);
    teacher_profile::ActiveModel {
        user_id: Set(Some(account.id)),
        teacher_id: Set(teacher_id),
        first_name: Set(resolved.first_name.clone()),
        last_name: Set(resolved.last_name.clone()),
        email: Set(account.email.clone()),
        department: Set(fields.department),
        status: Set(fields.status.unwrap_or_else(|| "active".to_string())),
        course_load: Set(fields.course_load),
        position: Set(fields.position),
        ..Default::default()
    }
    .insert(txn)
    .await
    .map_err(translate_db_conflict)
}
