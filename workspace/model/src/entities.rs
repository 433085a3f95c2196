//! This file serves as the root for all SeaORM entity modules.
//! We define the data models for the school-management application here:
//! login accounts, the role-specific student/teacher profile tables, and
//! the append-only activity log.

pub mod account;
pub mod activity_record;
pub mod student_profile;
pub mod teacher_profile;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::account::Entity as Account;
    pub use super::activity_record::Entity as ActivityRecord;
    pub use super::student_profile::Entity as StudentProfile;
    pub use super::teacher_profile::Entity as TeacherProfile;
}
