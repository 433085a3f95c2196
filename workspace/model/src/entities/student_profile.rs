use sea_orm::entity::prelude::*;

/// Role-specific extension of a student account.
///
/// `user_id` is nullable: profile rows can exist unlinked (e.g. imported from
/// a legacy enrollment list) and are adopted by an account later. `student_id`
/// and `email` are unique independently of the accounts table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "student_profiles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: Option<i32>,
    #[sea_orm(unique)]
    pub student_id: String,
    pub first_name: String,
    pub last_name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub phone: Option<String>,
    pub course: Option<String>,
    #[sea_orm(default_value = "active")]
    pub status: String,
    pub enrollment_date: Option<Date>,
    pub year_level: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::account::Entity",
        from = "Column::UserId",
        to = "super::account::Column::Id",
        on_delete = "SetNull",
        on_update = "Cascade"
    )]
    Account,
}

impl Related<super::account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Account.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
