use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// The role an account holds in the school.
/// Determines which profile table, if any, may reference the account.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[sea_orm(string_value = "student")]
    Student,
    #[sea_orm(string_value = "teacher")]
    Teacher,
    #[sea_orm(string_value = "admin")]
    Admin,
}

impl Role {
    /// Placeholder display name used when a request carries no usable name.
    pub fn placeholder_name(&self) -> &'static str {
        match self {
            Role::Student => "Student Account",
            Role::Teacher => "Teacher Account",
            Role::Admin => "Admin Account",
        }
    }
}

/// Represents a login identity. Students and teachers additionally carry a
/// profile row in their role's table; admins are accounts only.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    /// Display name, derived from first/last name at provisioning time.
    pub name: String,
    pub role: Role,
    /// Locked accounts are rejected at authentication time.
    #[sea_orm(default_value = "false")]
    pub is_locked: bool,
    /// Soft-delete marker. A non-null value means the account is archived
    /// but recoverable; default listings exclude it.
    pub deleted_at: Option<ChronoDateTimeUtc>,
    pub created_at: ChronoDateTimeUtc,
    pub updated_at: ChronoDateTimeUtc,
}

impl Model {
    pub fn is_archived(&self) -> bool {
        self.deleted_at.is_some()
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::student_profile::Entity")]
    StudentProfile,
    #[sea_orm(has_one = "super::teacher_profile::Entity")]
    TeacherProfile,
}

impl Related<super::student_profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StudentProfile.def()
    }
}

impl Related<super::teacher_profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TeacherProfile.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
