use chrono::Utc;
use model::entities::activity_record;
use sea_orm::{ActiveModelTrait, ConnectionTrait, Set};
use tracing::{debug, warn};

/// Append one activity record.
///
/// Best-effort by contract: a failed audit write is logged and swallowed,
/// never propagated, so it cannot mask or abort the operation it records.
pub async fn record<C>(db: &C, action: &str, actor: &str, detail: String)
where
    C: ConnectionTrait,
{
    let entry = activity_record::ActiveModel {
        action: Set(action.to_string()),
        actor: Set(actor.to_string()),
        detail: Set(detail),
        created_at: Set(Utc::now()),
        ..Default::default()
    };

    match entry.insert(db).await {
        Ok(saved) => debug!("Recorded activity '{}' (id {})", action, saved.id),
        Err(db_error) => warn!(
            "Failed to record activity '{}' by '{}': {}",
            action, actor, db_error
        ),
    }
}
