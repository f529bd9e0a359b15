// src/reviews/handlers.rs

use axum::extract::{Extension, Json, Path};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::models::{Review, ReviewWithAuthor, UpsertReviewRequest};
use super::validators::ReviewValidator;
use crate::auth::{AuthedUser, User};
use crate::common::{generate_review_id, ApiError, AppState, Validator};
use crate::profile::UserSummary;

/// POST /api/reviews - Create or update the caller's review for a track
///
/// One review per (user, track): a second submission for the same track
/// overwrites rating and text in place and bumps updated_at. The denormalized
/// track metadata keeps its review-time values.
pub async fn upsert_review(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Json(request): Json<UpsertReviewRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let state = state_lock.read().await.clone();

    let validation = ReviewValidator.validate(&request);
    if !validation.is_valid {
        return Err(validation.into());
    }

    let review_text = request.review_text.unwrap_or_default();

    // Single-statement upsert keyed on the (user_id, spotify_track_id)
    // unique index, so concurrent submissions cannot create duplicates
    sqlx::query(
        r#"
        INSERT INTO reviews (id, user_id, spotify_track_id, track_name, artist_name, album_image, rating, review_text)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT(user_id, spotify_track_id) DO UPDATE SET
            rating = excluded.rating,
            review_text = excluded.review_text,
            updated_at = datetime('now')
        "#,
    )
    .bind(generate_review_id())
    .bind(&authed.id)
    .bind(&request.spotify_track_id)
    .bind(&request.track_name)
    .bind(&request.artist_name)
    .bind(&request.album_image)
    .bind(request.rating)
    .bind(&review_text)
    .execute(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    let review = sqlx::query_as::<_, Review>(
        "SELECT * FROM reviews WHERE user_id = ? AND spotify_track_id = ?",
    )
    .bind(&authed.id)
    .bind(&request.spotify_track_id)
    .fetch_one(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    info!(
        user_id = %authed.id,
        track_id = %request.spotify_track_id,
        rating = request.rating,
        "Review saved"
    );

    Ok(Json(serde_json::json!({
        "success": true,
        "data": review,
    })))
}

/// GET /api/reviews/my-reviews - The caller's reviews, newest-created first
pub async fn my_reviews(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    let state = state_lock.read().await.clone();

    let reviews = sqlx::query_as::<_, Review>(
        "SELECT * FROM reviews WHERE user_id = ? ORDER BY created_at DESC",
    )
    .bind(&authed.id)
    .fetch_all(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    debug!(user_id = %authed.id, review_count = reviews.len(), "Loaded own reviews");

    Ok(Json(serde_json::json!({
        "success": true,
        "data": reviews,
    })))
}

/// GET /api/reviews/track/:track_id - The caller's review for one track
///
/// Absence is a query result, not an error: data is null when the caller
/// has not reviewed the track.
pub async fn review_for_track(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Path(track_id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let state = state_lock.read().await.clone();

    let review = sqlx::query_as::<_, Review>(
        "SELECT * FROM reviews WHERE user_id = ? AND spotify_track_id = ?",
    )
    .bind(&authed.id)
    .bind(&track_id)
    .fetch_optional(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    Ok(Json(serde_json::json!({
        "success": true,
        "data": review,
    })))
}

/// GET /api/reviews/user/:user_id - Another user's reviews, newest first,
/// each annotated with the author's summary
///
/// 404 only when the user id itself is unknown; a known user with zero
/// reviews yields an empty list.
pub async fn reviews_by_user(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    _authed: AuthedUser,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<ReviewWithAuthor>>, ApiError> {
    let state = state_lock.read().await.clone();

    let author = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(&user_id)
        .fetch_optional(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?
        .ok_or_else(|| ApiError::NotFound(format!("No user with id: {}", user_id)))?;

    let reviews = sqlx::query_as::<_, Review>(
        "SELECT * FROM reviews WHERE user_id = ? ORDER BY created_at DESC",
    )
    .bind(&user_id)
    .fetch_all(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    let summary: UserSummary = author.into();
    let annotated = reviews
        .into_iter()
        .map(|review| ReviewWithAuthor {
            review,
            user: summary.clone(),
        })
        .collect();

    Ok(Json(annotated))
}
