use sea_orm::entity::prelude::*;

/// Append-only audit entry. Rows are never updated or deleted.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "activity_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Action tag, e.g. "user_created", "user_archived".
    pub action: String,
    /// Identifier of whoever performed the action.
    pub actor: String,
    pub detail: String,
    pub created_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
