use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create accounts table
        manager
            .create_table(
                Table::create()
                    .table(Accounts::Table)
                    .if_not_exists()
                    .col(pk_auto(Accounts::Id))
                    .col(string(Accounts::Email).unique_key())
                    .col(string(Accounts::PasswordHash))
                    .col(string(Accounts::Name))
                    .col(string_len(Accounts::Role, 20))
                    .col(boolean(Accounts::IsLocked).default(false))
                    .col(timestamp_with_time_zone_null(Accounts::DeletedAt))
                    .col(timestamp_with_time_zone(Accounts::CreatedAt))
                    .col(timestamp_with_time_zone(Accounts::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        // Create student_profiles table
        manager
            .create_table(
                Table::create()
                    .table(StudentProfiles::Table)
                    .if_not_exists()
                    .col(pk_auto(StudentProfiles::Id))
                    .col(integer_null(StudentProfiles::UserId))
                    .col(string(StudentProfiles::StudentId).unique_key())
                    .col(string(StudentProfiles::FirstName))
                    .col(string(StudentProfiles::LastName))
                    .col(string(StudentProfiles::Email).unique_key())
                    .col(string_null(StudentProfiles::Phone))
                    .col(string_null(StudentProfiles::Course))
                    .col(string(StudentProfiles::Status).default("active"))
                    .col(date_null(StudentProfiles::EnrollmentDate))
                    .col(integer_null(StudentProfiles::YearLevel))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_student_profile_account")
                            .from(StudentProfiles::Table, StudentProfiles::UserId)
                            .to(Accounts::Table, Accounts::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create teacher_profiles table
        manager
            .create_table(
                Table::create()
                    .table(TeacherProfiles::Table)
                    .if_not_exists()
                    .col(pk_auto(TeacherProfiles::Id))
                    .col(integer_null(TeacherProfiles::UserId))
                    .col(string(TeacherProfiles::TeacherId).unique_key())
                    .col(string(TeacherProfiles::FirstName))
                    .col(string(TeacherProfiles::LastName))
                    .col(string(TeacherProfiles::Email).unique_key())
                    .col(string_null(TeacherProfiles::Department))
                    .col(string(TeacherProfiles::Status).default("active"))
                    .col(integer_null(TeacherProfiles::CourseLoad))
                    .col(string_null(TeacherProfiles::Position))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_teacher_profile_account")
                            .from(TeacherProfiles::Table, TeacherProfiles::UserId)
                            .to(Accounts::Table, Accounts::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create activity_records table
        manager
            .create_table(
                Table::create()
                    .table(ActivityRecords::Table)
                    .if_not_exists()
                    .col(pk_auto(ActivityRecords::Id))
                    .col(string(ActivityRecords::Action))
                    .col(string(ActivityRecords::Actor))
                    .col(string(ActivityRecords::Detail))
                    .col(timestamp_with_time_zone(ActivityRecords::CreatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ActivityRecords::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TeacherProfiles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StudentProfiles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Accounts::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Accounts {
    Table,
    Id,
    Email,
    PasswordHash,
    Name,
    Role,
    IsLocked,
    DeletedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum StudentProfiles {
    Table,
    Id,
    UserId,
    StudentId,
    FirstName,
    LastName,
    Email,
    Phone,
    Course,
    Status,
    EnrollmentDate,
    YearLevel,
}

#[derive(DeriveIden)]
enum TeacherProfiles {
    Table,
    Id,
    UserId,
    TeacherId,
    FirstName,
    LastName,
    Email,
    Department,
    Status,
    CourseLoad,
    Position,
}

#[derive(DeriveIden)]
enum ActivityRecords {
    Table,
    Id,
    Action,
    Actor,
    Detail,
    CreatedAt,
}
