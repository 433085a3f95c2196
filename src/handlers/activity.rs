use axum::{
    extract::{Query, State},
    response::Json,
};
use chrono::{DateTime, Utc};
use model::entities::activity_record;
use model::entities::prelude::ActivityRecord;
use sea_orm::{EntityTrait, QueryOrder, QuerySelect};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::schemas::{ApiResponse, AppState};

const DEFAULT_ACTIVITY_LIMIT: u64 = 50;

/// Query parameters for the activity log
#[derive(Debug, Deserialize, ToSchema)]
pub struct ActivityQuery {
    /// Maximum number of records to return (default 50)
    pub limit: Option<u64>,
}

/// Activity record response model
#[derive(Debug, Serialize, ToSchema)]
pub struct ActivityResponse {
    pub id: i32,
    pub action: String,
    pub actor: String,
    pub detail: String,
    pub created_at: DateTime<Utc>,
}

impl From<activity_record::Model> for ActivityResponse {
    fn from(model: activity_record::Model) -> Self {
        Self {
            id: model.id,
            action: model.action,
            actor: model.actor,
            detail: model.detail,
            created_at: model.created_at,
        }
    }
}

/// Get recent activity records, newest first
#[utoipa::path(
    get,
    path = "/api/v1/activity",
    tag = "activity",
    params(
        ("limit" = Option<u64>, Query, description = "Maximum number of records"),
    ),
    responses(
        (status = 200, description = "Activity retrieved successfully", body = ApiResponse<Vec<ActivityResponse>>),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_activity(
    Query(query): Query<ActivityQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<ActivityResponse>>>, ApiError> {
    trace!("Entering get_activity handler");
    let limit = query.limit.unwrap_or(DEFAULT_ACTIVITY_LIMIT);

    let records = ActivityRecord::find()
        .order_by_desc(activity_record::Column::CreatedAt)
        .order_by_desc(activity_record::Column::Id)
        .limit(limit)
        .all(&state.db)
        .await?;
    debug!("Retrieved {} activity records", records.len());

    let responses: Vec<ActivityResponse> =
        records.into_iter().map(ActivityResponse::from).collect();

    Ok(Json(ApiResponse {
        data: responses,
        message: "Activity retrieved successfully".to_string(),
        success: true,
    }))
}
