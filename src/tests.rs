#[cfg(test)]
mod integration_tests {
    use crate::auth::verify_password;
    use crate::router::create_router;
    use crate::schemas::AppState;
    use crate::test_utils::test_utils::{setup_test_app, setup_test_app_state};
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use chrono::Utc;
    use model::entities::prelude::{Account, StudentProfile, TeacherProfile};
    use model::entities::{account, student_profile, teacher_profile};
    use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set};
    use serde_json::{json, Value};

    /// Server plus direct database access for row-level assertions
    async fn setup() -> (TestServer, AppState) {
        let state = setup_test_app_state().await;
        let server = TestServer::new(create_router(state.clone())).unwrap();
        (server, state)
    }

    fn student_request(email: &str, name: &str) -> Value {
        json!({
            "name": name,
            "email": email,
            "password": "secret123",
            "role": "student",
        })
    }

    #[tokio::test]
    async fn test_health_check() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server.get("/health").await;
        response.assert_status(StatusCode::OK);
    }

    #[tokio::test]
    async fn test_create_student_account() {
        let (server, _state) = setup().await;

        let response = server
            .post("/api/v1/accounts")
            .json(&student_request("jane.doe@school.test", "Jane Mary Doe"))
            .await;
        response.assert_status(StatusCode::OK);

        let body: Value = response.json();
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Account created successfully");

        let account = &body["data"]["account"];
        assert_eq!(account["email"], "jane.doe@school.test");
        assert_eq!(account["name"], "Jane Mary Doe");
        assert_eq!(account["role"], "student");
        assert_eq!(account["is_locked"], false);
        assert_eq!(account["archived"], false);

        // Name derivation: first token vs. remainder
        let profile = &body["data"]["profile"];
        assert_eq!(profile["first_name"], "Jane");
        assert_eq!(profile["last_name"], "Mary Doe");
        assert!(profile["student_id"]
            .as_str()
            .unwrap()
            .starts_with("STU-"));
        assert_eq!(profile["user_id"], account["id"]);

        // Aggregate counts for the dashboard refresh
        let totals = &body["data"]["totals"];
        assert_eq!(totals["total_students"], 1);
        assert_eq!(totals["total_teachers"], 0);
        assert_eq!(totals["locked"], 0);
        assert_eq!(totals["archived"], 0);
    }

    #[tokio::test]
    async fn test_create_admin_account_has_no_profile() {
        let (server, _state) = setup().await;

        let response = server
            .post("/api/v1/accounts")
            .json(&json!({
                "first_name": "Ada",
                "last_name": "Boss",
                "email": "ada@school.test",
                "password": "secret123",
                "role": "admin",
            }))
            .await;
        response.assert_status(StatusCode::OK);

        let body: Value = response.json();
        assert_eq!(body["data"]["account"]["name"], "Ada Boss");
        assert!(body["data"]["profile"].is_null());
    }

    #[tokio::test]
    async fn test_missing_name_falls_back_to_placeholder() {
        let (server, _state) = setup().await;

        let response = server
            .post("/api/v1/accounts")
            .json(&json!({
                "email": "anon@school.test",
                "password": "secret123",
                "role": "student",
            }))
            .await;
        response.assert_status(StatusCode::OK);

        let body: Value = response.json();
        assert_eq!(body["data"]["account"]["name"], "Student Account");
        assert_eq!(body["data"]["profile"]["first_name"], "Student");
        assert_eq!(body["data"]["profile"]["last_name"], "Account");
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let (server, _state) = setup().await;

        let first = server
            .post("/api/v1/accounts")
            .json(&student_request("dup@school.test", "First One"))
            .await;
        first.assert_status(StatusCode::OK);

        let second = server
            .post("/api/v1/accounts")
            .json(&student_request("dup@school.test", "Second One"))
            .await;
        second.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

        let body: Value = second.json();
        assert_eq!(body["success"], false);
        assert!(body["errors"]["email"][0]
            .as_str()
            .unwrap()
            .contains("already been taken"));
    }

    #[tokio::test]
    async fn test_validation_errors_are_field_tagged() {
        let (server, _state) = setup().await;

        let response = server
            .post("/api/v1/accounts")
            .json(&json!({
                "name": "Bad Input",
                "email": "not-an-email",
                "password": "short",
                "role": "student",
            }))
            .await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

        let body: Value = response.json();
        assert_eq!(body["code"], "VALIDATION_FAILED");
        assert!(body["errors"]["email"][0].is_string());
        assert!(body["errors"]["password"][0]
            .as_str()
            .unwrap()
            .contains("at least 6"));
    }

    #[tokio::test]
    async fn test_unknown_fields_are_rejected() {
        let (server, _state) = setup().await;

        let response = server
            .post("/api/v1/accounts")
            .json(&json!({
                "email": "extra@school.test",
                "password": "secret123",
                "role": "student",
                "surprise": "field",
            }))
            .await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_supplied_student_id_conflicts_when_linked_elsewhere() {
        let (server, _state) = setup().await;

        let first = server
            .post("/api/v1/accounts")
            .json(&json!({
                "name": "Owner One",
                "email": "owner1@school.test",
                "password": "secret123",
                "role": "student",
                "student": { "student_id": "STU-00001" },
            }))
            .await;
        first.assert_status(StatusCode::OK);

        let second = server
            .post("/api/v1/accounts")
            .json(&json!({
                "name": "Owner Two",
                "email": "owner2@school.test",
                "password": "secret123",
                "role": "student",
                "student": { "student_id": "STU-00001" },
            }))
            .await;
        second.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

        let body: Value = second.json();
        assert!(body["errors"]["student_id"][0]
            .as_str()
            .unwrap()
            .contains("already been taken"));
    }

    #[tokio::test]
    async fn test_unlinked_profile_is_adopted_not_duplicated() {
        let (server, state) = setup().await;

        // Pre-existing unlinked profile, e.g. imported from an enrollment list
        let orphan = student_profile::ActiveModel {
            user_id: Set(None),
            student_id: Set("STU-77777".to_string()),
            first_name: Set("Old".to_string()),
            last_name: Set("Name".to_string()),
            email: Set("legacy@school.test".to_string()),
            phone: Set(None),
            course: Set(Some("BS Biology".to_string())),
            status: Set("active".to_string()),
            enrollment_date: Set(None),
            year_level: Set(Some(1)),
            ..Default::default()
        }
        .insert(&state.db)
        .await
        .unwrap();

        let response = server
            .post("/api/v1/accounts")
            .json(&json!({
                "name": "New Owner",
                "email": "new.owner@school.test",
                "password": "secret123",
                "role": "student",
                "student": { "student_id": "STU-77777" },
            }))
            .await;
        response.assert_status(StatusCode::OK);

        let body: Value = response.json();
        let account_id = body["data"]["account"]["id"].as_i64().unwrap() as i32;

        // Row adopted in place: count unchanged, user_id now set
        let count = StudentProfile::find().count(&state.db).await.unwrap();
        assert_eq!(count, 1);
        let adopted = StudentProfile::find_by_id(orphan.id)
            .one(&state.db)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(adopted.user_id, Some(account_id));
        assert_eq!(adopted.first_name, "New");
        assert_eq!(adopted.email, "new.owner@school.test");
        // Untouched optional fields survive adoption
        assert_eq!(adopted.course.as_deref(), Some("BS Biology"));
    }

    #[tokio::test]
    async fn test_commit_conflict_rolls_back_account_row() {
        let (server, state) = setup().await;

        // Two unlinked profiles arranged so the pre-checks pass but the
        // adopted row's email collides at write time.
        student_profile::ActiveModel {
            user_id: Set(None),
            student_id: Set("STU-11111".to_string()),
            first_name: Set("A".to_string()),
            last_name: Set("One".to_string()),
            email: Set("a.one@school.test".to_string()),
            phone: Set(None),
            course: Set(None),
            status: Set("active".to_string()),
            enrollment_date: Set(None),
            year_level: Set(None),
            ..Default::default()
        }
        .insert(&state.db)
        .await
        .unwrap();
        student_profile::ActiveModel {
            user_id: Set(None),
            student_id: Set("STU-22222".to_string()),
            first_name: Set("B".to_string()),
            last_name: Set("Two".to_string()),
            email: Set("taken@school.test".to_string()),
            phone: Set(None),
            course: Set(None),
            status: Set("active".to_string()),
            enrollment_date: Set(None),
            year_level: Set(None),
            ..Default::default()
        }
        .insert(&state.db)
        .await
        .unwrap();

        // Adopting STU-11111 overwrites its email to taken@school.test,
        // which the second profile already owns.
        let response = server
            .post("/api/v1/accounts")
            .json(&json!({
                "name": "Race Loser",
                "email": "taken@school.test",
                "password": "secret123",
                "role": "student",
                "student": { "student_id": "STU-11111" },
            }))
            .await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

        let body: Value = response.json();
        assert!(body["errors"]["email"][0].is_string());

        // Atomicity: no half-created account survives the rollback
        let leftover = Account::find()
            .filter(account::Column::Email.eq("taken@school.test"))
            .one(&state.db)
            .await
            .unwrap();
        assert!(leftover.is_none());
        // The orphan profile was not claimed either
        let orphan = StudentProfile::find()
            .filter(student_profile::Column::StudentId.eq("STU-11111"))
            .one(&state.db)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(orphan.user_id, None);
        assert_eq!(orphan.email, "a.one@school.test");
    }

    #[tokio::test]
    async fn test_partial_update_preserves_omitted_fields() {
        let (server, _state) = setup().await;

        let created = server
            .post("/api/v1/accounts")
            .json(&json!({
                "first_name": "Jane",
                "last_name": "Doe",
                "email": "jane.update@school.test",
                "password": "secret123",
                "role": "student",
                "student": { "course": "BS Physics", "year_level": 2 },
            }))
            .await;
        created.assert_status(StatusCode::OK);
        let created_body: Value = created.json();
        let id = created_body["data"]["account"]["id"].as_i64().unwrap();

        // Change the first name only
        let updated = server
            .put(&format!("/api/v1/accounts/{}", id))
            .json(&json!({ "first_name": "Janet" }))
            .await;
        updated.assert_status(StatusCode::OK);

        let body: Value = updated.json();
        // Last name backfilled from the linked profile
        assert_eq!(body["data"]["account"]["name"], "Janet Doe");
        assert_eq!(body["data"]["profile"]["first_name"], "Janet");
        assert_eq!(body["data"]["profile"]["last_name"], "Doe");
        assert_eq!(body["data"]["profile"]["course"], "BS Physics");
        assert_eq!(body["data"]["profile"]["year_level"], 2);
        // Email untouched
        assert_eq!(body["data"]["account"]["email"], "jane.update@school.test");
    }

    #[tokio::test]
    async fn test_email_only_update_moves_profile_email() {
        let (server, state) = setup().await;

        let created = server
            .post("/api/v1/accounts")
            .json(&json!({
                "name": "Mail Mover",
                "email": "old.mail@school.test",
                "password": "secret123",
                "role": "student",
                "student": { "student_id": "STU-90001" },
            }))
            .await;
        created.assert_status(StatusCode::OK);
        let created_body: Value = created.json();
        let id = created_body["data"]["account"]["id"].as_i64().unwrap();

        let updated = server
            .put(&format!("/api/v1/accounts/{}", id))
            .json(&json!({ "email": "new.mail@school.test" }))
            .await;
        updated.assert_status(StatusCode::OK);

        let body: Value = updated.json();
        assert_eq!(body["data"]["account"]["email"], "new.mail@school.test");
        // The existing profile follows the account: same row, same external
        // identifier, new email. No second row is minted.
        assert_eq!(body["data"]["profile"]["student_id"], "STU-90001");
        assert_eq!(body["data"]["profile"]["email"], "new.mail@school.test");

        let linked = StudentProfile::find()
            .filter(student_profile::Column::UserId.eq(id as i32))
            .all(&state.db)
            .await
            .unwrap();
        assert_eq!(linked.len(), 1);
        assert_eq!(linked[0].student_id, "STU-90001");
        assert_eq!(linked[0].email, "new.mail@school.test");
    }

    #[tokio::test]
    async fn test_email_only_update_keeps_single_teacher_profile() {
        let (server, state) = setup().await;

        let created = server
            .post("/api/v1/accounts")
            .json(&json!({
                "name": "Tea Mover",
                "email": "tea.old@school.test",
                "password": "secret123",
                "role": "teacher",
                "teacher": { "teacher_id": "TEA-90001", "department": "History" },
            }))
            .await;
        created.assert_status(StatusCode::OK);
        let created_body: Value = created.json();
        let id = created_body["data"]["account"]["id"].as_i64().unwrap();

        let updated = server
            .put(&format!("/api/v1/accounts/{}", id))
            .json(&json!({ "email": "tea.new@school.test" }))
            .await;
        updated.assert_status(StatusCode::OK);

        let body: Value = updated.json();
        assert_eq!(body["data"]["profile"]["teacher_id"], "TEA-90001");
        assert_eq!(body["data"]["profile"]["email"], "tea.new@school.test");
        assert_eq!(body["data"]["profile"]["department"], "History");

        let linked = TeacherProfile::find()
            .filter(teacher_profile::Column::UserId.eq(id as i32))
            .all(&state.db)
            .await
            .unwrap();
        assert_eq!(linked.len(), 1);
    }

    #[tokio::test]
    async fn test_update_does_not_conflict_with_itself() {
        let (server, _state) = setup().await;

        let created = server
            .post("/api/v1/accounts")
            .json(&json!({
                "name": "Self Same",
                "email": "self@school.test",
                "password": "secret123",
                "role": "student",
                "student": { "student_id": "STU-55555" },
            }))
            .await;
        created.assert_status(StatusCode::OK);
        let created_body: Value = created.json();
        let id = created_body["data"]["account"]["id"].as_i64().unwrap();

        // Re-submitting the record's own unique values must not conflict
        let updated = server
            .put(&format!("/api/v1/accounts/{}", id))
            .json(&json!({
                "email": "self@school.test",
                "student": { "student_id": "STU-55555" },
            }))
            .await;
        updated.assert_status(StatusCode::OK);
    }

    #[tokio::test]
    async fn test_role_change_links_new_profile_and_orphans_old() {
        let (server, state) = setup().await;

        let created = server
            .post("/api/v1/accounts")
            .json(&json!({
                "name": "Role Changer",
                "email": "changer@school.test",
                "password": "secret123",
                "role": "student",
            }))
            .await;
        created.assert_status(StatusCode::OK);
        let created_body: Value = created.json();
        let id = created_body["data"]["account"]["id"].as_i64().unwrap();

        let updated = server
            .put(&format!("/api/v1/accounts/{}", id))
            .json(&json!({
                "role": "teacher",
                "teacher": { "department": "Mathematics" },
            }))
            .await;
        updated.assert_status(StatusCode::OK);

        let body: Value = updated.json();
        assert_eq!(body["data"]["account"]["role"], "teacher");
        assert!(body["data"]["profile"]["teacher_id"]
            .as_str()
            .unwrap()
            .starts_with("TEA-"));
        assert_eq!(body["data"]["profile"]["department"], "Mathematics");

        // The student profile row stays behind, still linked
        let old = StudentProfile::find()
            .filter(student_profile::Column::UserId.eq(id as i32))
            .one(&state.db)
            .await
            .unwrap();
        assert!(old.is_some());
        let teachers = TeacherProfile::find().count(&state.db).await.unwrap();
        assert_eq!(teachers, 1);
    }

    #[tokio::test]
    async fn test_update_missing_account_is_not_found() {
        let (server, _state) = setup().await;

        let response = server
            .put("/api/v1/accounts/4242")
            .json(&json!({ "first_name": "Nobody" }))
            .await;
        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_archive_restore_round_trip() {
        let (server, _state) = setup().await;

        let created = server
            .post("/api/v1/accounts")
            .json(&json!({
                "name": "Archie Ved",
                "email": "archie@school.test",
                "password": "secret123",
                "role": "student",
                "student": { "student_id": "STU-88888", "course": "BS Chemistry" },
            }))
            .await;
        created.assert_status(StatusCode::OK);
        let created_body: Value = created.json();
        let id = created_body["data"]["account"]["id"].as_i64().unwrap();

        // Archive
        let deleted = server.delete(&format!("/api/v1/accounts/{}", id)).await;
        deleted.assert_status(StatusCode::OK);

        // Default listing no longer includes it
        let listing = server.get("/api/v1/accounts").await;
        let listing_body: Value = listing.json();
        assert!(listing_body["data"]
            .as_array()
            .unwrap()
            .iter()
            .all(|a| a["id"] != id));

        // ...but the archived listing does
        let archived_listing = server
            .get("/api/v1/accounts?include_archived=true")
            .await;
        let archived_body: Value = archived_listing.json();
        assert!(archived_body["data"]
            .as_array()
            .unwrap()
            .iter()
            .any(|a| a["id"] == id && a["archived"] == true));

        // Archiving twice is a distinct failure
        let again = server.delete(&format!("/api/v1/accounts/{}", id)).await;
        again.assert_status(StatusCode::CONFLICT);

        // Login on an archived account has its own outcome
        let login = server
            .post("/api/v1/auth/login")
            .json(&json!({ "email": "archie@school.test", "password": "secret123" }))
            .await;
        login.assert_status(StatusCode::FORBIDDEN);

        // Restore
        let restored = server
            .post(&format!("/api/v1/accounts/{}/restore", id))
            .await;
        restored.assert_status(StatusCode::OK);

        // Back in the default listing, profile data intact
        let detail = server.get(&format!("/api/v1/accounts/{}", id)).await;
        detail.assert_status(StatusCode::OK);
        let detail_body: Value = detail.json();
        assert_eq!(detail_body["data"]["account"]["archived"], false);
        assert_eq!(detail_body["data"]["profile"]["student_id"], "STU-88888");
        assert_eq!(detail_body["data"]["profile"]["course"], "BS Chemistry");
    }

    #[tokio::test]
    async fn test_force_delete_removes_account_and_profile() {
        let (server, state) = setup().await;

        let created = server
            .post("/api/v1/accounts")
            .json(&student_request("gone@school.test", "Gone Soon"))
            .await;
        created.assert_status(StatusCode::OK);
        let created_body: Value = created.json();
        let id = created_body["data"]["account"]["id"].as_i64().unwrap();

        let deleted = server
            .delete(&format!("/api/v1/accounts/{}?force=1", id))
            .await;
        deleted.assert_status(StatusCode::OK);

        let detail = server.get(&format!("/api/v1/accounts/{}", id)).await;
        detail.assert_status(StatusCode::NOT_FOUND);

        let profiles = StudentProfile::find()
            .filter(student_profile::Column::UserId.eq(id as i32))
            .count(&state.db)
            .await
            .unwrap();
        assert_eq!(profiles, 0);
    }

    #[tokio::test]
    async fn test_locked_account_fails_login_with_distinct_outcome() {
        let (server, _state) = setup().await;

        let created = server
            .post("/api/v1/accounts")
            .json(&student_request("locked@school.test", "Lock Me"))
            .await;
        created.assert_status(StatusCode::OK);
        let created_body: Value = created.json();
        let id = created_body["data"]["account"]["id"].as_i64().unwrap();

        // Correct credentials log in fine
        let login = server
            .post("/api/v1/auth/login")
            .json(&json!({ "email": "locked@school.test", "password": "secret123" }))
            .await;
        login.assert_status(StatusCode::OK);

        // Lock, then the same credentials are rejected with the locked outcome
        let locked = server
            .post(&format!("/api/v1/accounts/{}/lock", id))
            .await;
        locked.assert_status(StatusCode::OK);

        let login = server
            .post("/api/v1/auth/login")
            .json(&json!({ "email": "locked@school.test", "password": "secret123" }))
            .await;
        login.assert_status(StatusCode::LOCKED);
        let login_body: Value = login.json();
        assert_eq!(login_body["code"], "ACCOUNT_LOCKED");

        // Unlock and toggle
        let unlocked = server
            .post(&format!("/api/v1/accounts/{}/unlock", id))
            .await;
        unlocked.assert_status(StatusCode::OK);
        let unlocked_body: Value = unlocked.json();
        assert_eq!(unlocked_body["data"]["is_locked"], false);

        let toggled = server
            .post(&format!("/api/v1/accounts/{}/toggle-lock", id))
            .await;
        toggled.assert_status(StatusCode::OK);
        let toggled_body: Value = toggled.json();
        assert_eq!(toggled_body["data"]["is_locked"], true);
    }

    #[tokio::test]
    async fn test_wrong_password_is_invalid_credentials() {
        let (server, _state) = setup().await;

        server
            .post("/api/v1/accounts")
            .json(&student_request("creds@school.test", "Cred Check"))
            .await
            .assert_status(StatusCode::OK);

        let login = server
            .post("/api/v1/auth/login")
            .json(&json!({ "email": "creds@school.test", "password": "wrong-pass" }))
            .await;
        login.assert_status(StatusCode::UNAUTHORIZED);
        let body: Value = login.json();
        assert_eq!(body["code"], "INVALID_CREDENTIALS");

        let login = server
            .post("/api/v1/auth/login")
            .json(&json!({ "email": "nobody@school.test", "password": "whatever" }))
            .await;
        login.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_legacy_plaintext_credential_upgraded_on_login() {
        let (server, state) = setup().await;

        // Account imported with a plain-text credential
        let now = Utc::now();
        let legacy = account::ActiveModel {
            email: Set("legacy@school.test".to_string()),
            password_hash: Set("plain-secret".to_string()),
            name: Set("Legacy User".to_string()),
            role: Set(account::Role::Admin),
            is_locked: Set(false),
            deleted_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&state.db)
        .await
        .unwrap();

        let login = server
            .post("/api/v1/auth/login")
            .json(&json!({ "email": "legacy@school.test", "password": "plain-secret" }))
            .await;
        login.assert_status(StatusCode::OK);

        // Credential transparently re-hashed
        let upgraded = Account::find_by_id(legacy.id)
            .one(&state.db)
            .await
            .unwrap()
            .unwrap();
        assert_ne!(upgraded.password_hash, "plain-secret");
        assert!(verify_password("plain-secret", &upgraded.password_hash));
    }

    #[tokio::test]
    async fn test_totals_reflect_mutations() {
        let (server, _state) = setup().await;

        server
            .post("/api/v1/accounts")
            .json(&student_request("t1@school.test", "Totals One"))
            .await
            .assert_status(StatusCode::OK);
        let teacher = server
            .post("/api/v1/accounts")
            .json(&json!({
                "name": "Totals Teacher",
                "email": "t2@school.test",
                "password": "secret123",
                "role": "teacher",
            }))
            .await;
        teacher.assert_status(StatusCode::OK);
        let teacher_body: Value = teacher.json();
        let teacher_id = teacher_body["data"]["account"]["id"].as_i64().unwrap();

        server
            .delete(&format!("/api/v1/accounts/{}", teacher_id))
            .await
            .assert_status(StatusCode::OK);

        let totals = server.get("/api/v1/accounts/totals").await;
        totals.assert_status(StatusCode::OK);
        let body: Value = totals.json();
        assert_eq!(body["data"]["total_students"], 1);
        // Archived teacher drops out of the active count
        assert_eq!(body["data"]["total_teachers"], 0);
        assert_eq!(body["data"]["archived"], 1);
    }

    #[tokio::test]
    async fn test_activity_log_records_provisioning_actions() {
        let (server, _state) = setup().await;

        let created = server
            .post("/api/v1/accounts")
            .json(&student_request("audited@school.test", "Audit Me"))
            .await;
        created.assert_status(StatusCode::OK);
        let created_body: Value = created.json();
        let id = created_body["data"]["account"]["id"].as_i64().unwrap();

        server
            .delete(&format!("/api/v1/accounts/{}", id))
            .await
            .assert_status(StatusCode::OK);

        let activity = server.get("/api/v1/activity").await;
        activity.assert_status(StatusCode::OK);
        let body: Value = activity.json();
        let actions: Vec<&str> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["action"].as_str().unwrap())
            .collect();
        assert!(actions.contains(&"user_created"));
        assert!(actions.contains(&"user_archived"));
        // Newest first
        assert_eq!(actions.first(), Some(&"user_archived"));
    }

    #[tokio::test]
    async fn test_role_filter_on_listing() {
        let (server, _state) = setup().await;

        server
            .post("/api/v1/accounts")
            .json(&student_request("s@school.test", "Stu Dent"))
            .await
            .assert_status(StatusCode::OK);
        server
            .post("/api/v1/accounts")
            .json(&json!({
                "name": "Tea Cher",
                "email": "t@school.test",
                "password": "secret123",
                "role": "teacher",
            }))
            .await
            .assert_status(StatusCode::OK);

        let response = server.get("/api/v1/accounts?role=teacher").await;
        response.assert_status(StatusCode::OK);
        let body: Value = response.json();
        let accounts = body["data"].as_array().unwrap();
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0]["role"], "teacher");
    }
}
