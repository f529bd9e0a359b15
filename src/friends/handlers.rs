// src/friends/handlers.rs

use axum::extract::{Extension, Json};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::models::{FriendRequest, FriendSummary, MessageResponse};
use crate::auth::AuthedUser;
use crate::common::{ApiError, AppState};

/// GET /api/friends - Full summaries for every friend reference
pub async fn list_friends(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
) -> Result<Json<Vec<FriendSummary>>, ApiError> {
    let state = state_lock.read().await.clone();

    let friends = sqlx::query_as::<_, FriendSummary>(
        r#"
        SELECT u.id, u.username, u.display_name, u.profile_picture, u.email
        FROM users u
        JOIN friendships f ON u.id = f.friend_id
        WHERE f.user_id = ?
        ORDER BY f.created_at
        "#,
    )
    .bind(&authed.id)
    .fetch_all(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    debug!(user_id = %authed.id, friend_count = friends.len(), "Loaded friends list");

    Ok(Json(friends))
}

/// POST /api/friends/add - Append a directed friend edge
///
/// NotFound when the target does not resolve to a user; Conflict when the
/// edge already exists. Adding A->B does not add B->A.
pub async fn add_friend(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Json(request): Json<FriendRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let state = state_lock.read().await.clone();

    if request.friend_id == authed.id {
        return Err(ApiError::ValidationError(
            "Cannot add yourself as a friend".to_string(),
        ));
    }

    let target: Option<(String,)> = sqlx::query_as("SELECT id FROM users WHERE id = ?")
        .bind(&request.friend_id)
        .fetch_optional(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    if target.is_none() {
        return Err(ApiError::NotFound(format!(
            "No user with id: {}",
            request.friend_id
        )));
    }

    let existing: Option<(String,)> =
        sqlx::query_as("SELECT friend_id FROM friendships WHERE user_id = ? AND friend_id = ?")
            .bind(&authed.id)
            .bind(&request.friend_id)
            .fetch_optional(&state.db)
            .await
            .map_err(ApiError::DatabaseError)?;

    if existing.is_some() {
        return Err(ApiError::Conflict("Already in your friends list".to_string()));
    }

    sqlx::query("INSERT INTO friendships (user_id, friend_id) VALUES (?, ?)")
        .bind(&authed.id)
        .bind(&request.friend_id)
        .execute(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    info!(
        user_id = %authed.id,
        friend_id = %request.friend_id,
        "Friend added"
    );

    Ok(Json(MessageResponse {
        message: "Friend added".to_string(),
    }))
}

/// POST /api/friends/remove - Remove a friend edge if present
///
/// Idempotent: removing an absent reference is still a success.
pub async fn remove_friend(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Json(request): Json<FriendRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let state = state_lock.read().await.clone();

    let result = sqlx::query("DELETE FROM friendships WHERE user_id = ? AND friend_id = ?")
        .bind(&authed.id)
        .bind(&request.friend_id)
        .execute(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    info!(
        user_id = %authed.id,
        friend_id = %request.friend_id,
        removed = result.rows_affected() > 0,
        "Friend remove processed"
    );

    Ok(Json(MessageResponse {
        message: "Friend removed".to_string(),
    }))
}
