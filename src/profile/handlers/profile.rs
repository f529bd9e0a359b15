// src/profile/handlers/profile.rs

use axum::{
    extract::{Extension, Json, Path, Query},
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::super::models::{
    PublicProfileResponse, SetUsernameRequest, UserResponse, UserSearchQuery, UserSummary,
};
use super::super::validators::UsernameValidator;
use crate::auth::{AuthedUser, User};
use crate::common::{ApiError, AppState, Validator};

/// GET /api/profile - Return the caller's own identity record
pub async fn get_profile(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
) -> Result<Json<UserResponse>, ApiError> {
    let state = state_lock.read().await.clone();

    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(&authed.id)
        .fetch_one(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    Ok(Json(user.into()))
}

/// PUT /api/username - Set or change the caller's handle
///
/// A handle, once set, is globally unique (case-sensitive exact match);
/// re-setting your own current handle is a no-op success.
pub async fn set_username(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Json(request): Json<SetUsernameRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let state = state_lock.read().await.clone();

    let validation = UsernameValidator.validate(&request);
    if !validation.is_valid {
        return Err(validation.into());
    }

    let username = request.username.trim().to_string();

    // Uniqueness is enforced here ahead of the unique index so the caller
    // gets a Conflict rather than a bare constraint failure
    let holder: Option<(String,)> = sqlx::query_as("SELECT id FROM users WHERE username = ?")
        .bind(&username)
        .fetch_optional(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    if let Some((holder_id,)) = holder {
        if holder_id != authed.id {
            return Err(ApiError::Conflict("Username already taken".to_string()));
        }
    }

    // The unique index is the last word: a concurrent claim that slipped
    // past the check above still surfaces as a Conflict, not a 500
    sqlx::query("UPDATE users SET username = ? WHERE id = ?")
        .bind(&username)
        .bind(&authed.id)
        .execute(&state.db)
        .await
        .map_err(map_unique_username_violation)?;

    info!(user_id = %authed.id, username = %username, "Username updated");

    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(&authed.id)
        .fetch_one(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    Ok(Json(user.into()))
}

fn escape_like(pattern: &str) -> String {
    pattern
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

pub(crate) fn map_unique_username_violation(e: sqlx::Error) -> ApiError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            return ApiError::Conflict("Username already taken".to_string());
        }
    }
    ApiError::DatabaseError(e)
}

/// GET /api/user/search?q= - Search identities by handle or display name
///
/// Case-insensitive substring match, always excluding the caller. Returns
/// summaries only.
pub async fn search_users(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Query(params): Query<UserSearchQuery>,
) -> Result<Json<Vec<UserSummary>>, ApiError> {
    let state = state_lock.read().await.clone();

    let query = params.q.unwrap_or_default();
    let query = query.trim();
    if query.is_empty() {
        return Err(ApiError::ValidationError(
            "Search query is required".to_string(),
        ));
    }

    // % and _ in the input are literal characters, not LIKE wildcards
    let escaped = escape_like(query);

    let users = sqlx::query_as::<_, UserSummary>(
        r#"
        SELECT id, username, display_name, profile_picture
        FROM users
        WHERE id != ?
          AND (LOWER(username) LIKE '%' || LOWER(?) || '%' ESCAPE '\'
               OR LOWER(display_name) LIKE '%' || LOWER(?) || '%' ESCAPE '\')
        ORDER BY username
        "#,
    )
    .bind(&authed.id)
    .bind(&escaped)
    .bind(&escaped)
    .fetch_all(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    debug!(
        query = %query,
        result_count = users.len(),
        "User search completed"
    );

    Ok(Json(users))
}

/// GET /api/user/:username - Public profile lookup by handle (no credential)
pub async fn public_profile(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Path(username): Path<String>,
) -> Result<Json<PublicProfileResponse>, ApiError> {
    let state = state_lock.read().await.clone();

    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = ?")
        .bind(&username)
        .fetch_optional(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?
        .ok_or_else(|| ApiError::NotFound(format!("No user with username: {}", username)))?;

    let friends = sqlx::query_as::<_, UserSummary>(
        r#"
        SELECT u.id, u.username, u.display_name, u.profile_picture
        FROM users u
        JOIN friendships f ON u.id = f.friend_id
        WHERE f.user_id = ?
        ORDER BY f.created_at
        "#,
    )
    .bind(&user.id)
    .fetch_all(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    Ok(Json(PublicProfileResponse {
        user: user.into(),
        friends,
    }))
}
