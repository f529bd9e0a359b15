//! Tests for profile module
//!
//! These tests verify username validation rules and the public summary
//! mapping (no credential fields leak into summaries).

#[cfg(test)]
mod tests {
    use super::super::models::{SetUsernameRequest, UserSummary};
    use super::super::validators::UsernameValidator;
    use crate::auth::User;
    use crate::common::Validator;

    fn request(username: &str) -> SetUsernameRequest {
        SetUsernameRequest {
            username: username.to_string(),
        }
    }

    #[test]
    fn test_username_minimum_length() {
        let result = UsernameValidator.validate(&request("ab"));
        assert!(!result.is_valid, "2-character username must fail");

        let result = UsernameValidator.validate(&request("abc"));
        assert!(result.is_valid, "3-character username must pass");
    }

    #[test]
    fn test_username_allowed_characters() {
        assert!(UsernameValidator.validate(&request("bob_123")).is_valid);
        assert!(UsernameValidator.validate(&request("Bob_123")).is_valid);
        assert!(!UsernameValidator.validate(&request("bob-123")).is_valid);
        assert!(!UsernameValidator.validate(&request("bob 123")).is_valid);
        assert!(!UsernameValidator.validate(&request("böb")).is_valid);
        assert!(!UsernameValidator.validate(&request("bob!")).is_valid);
    }

    #[test]
    fn test_username_whitespace_is_trimmed_before_checks() {
        // "  ab  " trims to "ab" which is too short
        let result = UsernameValidator.validate(&request("  ab  "));
        assert!(!result.is_valid);
    }

    #[test]
    fn test_username_maximum_length() {
        let long = "a".repeat(31);
        assert!(!UsernameValidator.validate(&request(&long)).is_valid);
    }

    #[test]
    fn test_summary_excludes_credentials() {
        let user = User {
            id: "U_ABC123".to_string(),
            google_id: "google-subject-id".to_string(),
            username: Some("bob".to_string()),
            email: "bob@example.com".to_string(),
            display_name: "Bob".to_string(),
            profile_picture: None,
            created_at: None,
        };

        let summary: UserSummary = user.into();
        let json = serde_json::to_value(&summary).unwrap();

        assert_eq!(json["id"], "U_ABC123");
        assert_eq!(json["username"], "bob");
        assert_eq!(json["displayName"], "Bob");
        assert!(json.get("googleId").is_none());
        assert!(json.get("email").is_none());
    }
}

#[cfg(test)]
mod scenario_tests {
    use super::super::handlers::profile as handlers;
    use super::super::models::{SetUsernameRequest, UserSearchQuery};
    use crate::common::error::ApiError;
    use crate::common::test_support::{authed_user, insert_user, test_state};
    use axum::extract::{Extension, Json, Path, Query};

    #[tokio::test]
    async fn test_username_claim_and_conflict() {
        let state = test_state().await;
        insert_user(&state, "U_ALICE1", None, "Alice").await;
        insert_user(&state, "U_BOB001", None, "Bob").await;

        let updated = handlers::set_username(
            Extension(state.clone()),
            authed_user("U_ALICE1", "Alice"),
            Json(SetUsernameRequest {
                username: "melody".to_string(),
            }),
        )
        .await
        .expect("first claim")
        .0;
        assert_eq!(updated.username.as_deref(), Some("melody"));

        // Another identity cannot take the same handle
        let err = handlers::set_username(
            Extension(state.clone()),
            authed_user("U_BOB001", "Bob"),
            Json(SetUsernameRequest {
                username: "melody".to_string(),
            }),
        )
        .await
        .expect_err("handle is taken");
        assert!(matches!(err, ApiError::Conflict(_)));

        // Re-setting your own current handle is a no-op success
        let updated = handlers::set_username(
            Extension(state.clone()),
            authed_user("U_ALICE1", "Alice"),
            Json(SetUsernameRequest {
                username: "melody".to_string(),
            }),
        )
        .await
        .expect("own handle again")
        .0;
        assert_eq!(updated.username.as_deref(), Some("melody"));
    }

    #[tokio::test]
    async fn test_invalid_username_never_reaches_storage() {
        let state = test_state().await;
        insert_user(&state, "U_ALICE1", None, "Alice").await;

        let err = handlers::set_username(
            Extension(state.clone()),
            authed_user("U_ALICE1", "Alice"),
            Json(SetUsernameRequest {
                username: "a!".to_string(),
            }),
        )
        .await
        .expect_err("invalid handle");
        assert!(matches!(err, ApiError::ValidationError(_)));

        let profile = handlers::get_profile(
            Extension(state.clone()),
            authed_user("U_ALICE1", "Alice"),
        )
        .await
        .expect("profile")
        .0;
        assert!(profile.username.is_none());
    }

    #[tokio::test]
    async fn test_search_matches_substring_and_excludes_caller() {
        let state = test_state().await;
        insert_user(&state, "U_ALICE1", Some("melody"), "Alice").await;
        insert_user(&state, "U_BOB001", Some("drummer_bob"), "Bob").await;
        insert_user(&state, "U_CAROL1", None, "Carol Melo").await;

        let found = handlers::search_users(
            Extension(state.clone()),
            authed_user("U_ALICE1", "Alice"),
            Query(UserSearchQuery {
                q: Some("MELO".to_string()),
            }),
        )
        .await
        .expect("search")
        .0;

        // Case-insensitive match on display name, caller's own handle excluded
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "U_CAROL1");

        let err = handlers::search_users(
            Extension(state.clone()),
            authed_user("U_ALICE1", "Alice"),
            Query(UserSearchQuery { q: None }),
        )
        .await
        .expect_err("query required");
        assert!(matches!(err, ApiError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_public_profile_by_handle() {
        let state = test_state().await;
        insert_user(&state, "U_ALICE1", Some("melody"), "Alice").await;
        insert_user(&state, "U_BOB001", Some("drummer_bob"), "Bob").await;

        let db = state.read().await.db.clone();
        sqlx::query("INSERT INTO friendships (user_id, friend_id) VALUES ('U_ALICE1', 'U_BOB001')")
            .execute(&db)
            .await
            .unwrap();

        let profile = handlers::public_profile(
            Extension(state.clone()),
            Path("melody".to_string()),
        )
        .await
        .expect("known handle")
        .0;
        assert_eq!(profile.user.id, "U_ALICE1");
        assert_eq!(profile.friends.len(), 1);
        assert_eq!(profile.friends[0].username.as_deref(), Some("drummer_bob"));

        let err = handlers::public_profile(
            Extension(state.clone()),
            Path("nobody".to_string()),
        )
        .await
        .expect_err("unknown handle");
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_lost_claim_race_maps_to_conflict() {
        let state = test_state().await;
        insert_user(&state, "U_ALICE1", Some("melody"), "Alice").await;
        insert_user(&state, "U_BOB001", None, "Bob").await;

        // A second claimant that slipped past the pre-check hits the unique
        // index directly; that failure must read as a Conflict
        let db = state.read().await.db.clone();
        let err = sqlx::query("UPDATE users SET username = 'melody' WHERE id = 'U_BOB001'")
            .execute(&db)
            .await
            .expect_err("unique index rejects the duplicate");

        assert!(matches!(
            handlers::map_unique_username_violation(err),
            ApiError::Conflict(_)
        ));
    }

    #[tokio::test]
    async fn test_search_treats_wildcards_as_literal_characters() {
        let state = test_state().await;
        insert_user(&state, "U_ALICE1", Some("melody"), "Alice").await;
        insert_user(&state, "U_BOB001", Some("winter_wolf"), "100% Bob").await;
        insert_user(&state, "U_CAROL1", Some("carol"), "Carol").await;

        // '%' only matches the identity whose display name contains it
        let found = handlers::search_users(
            Extension(state.clone()),
            authed_user("U_ALICE1", "Alice"),
            Query(UserSearchQuery {
                q: Some("%".to_string()),
            }),
        )
        .await
        .expect("search")
        .0;
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "U_BOB001");

        // '_' only matches the handle with a literal underscore
        let found = handlers::search_users(
            Extension(state.clone()),
            authed_user("U_ALICE1", "Alice"),
            Query(UserSearchQuery {
                q: Some("_".to_string()),
            }),
        )
        .await
        .expect("search")
        .0;
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "U_BOB001");
    }
}
