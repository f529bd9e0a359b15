// src/spotify/handlers.rs

use axum::extract::{Extension, Json, Query};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::models::{CallbackParams, SearchParams, TrendingParams};
use crate::common::{ApiError, AppState};

/// GET /api/spotify/callback?code= - Server-side code-for-token exchange
pub async fn spotify_callback(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Query(params): Query<CallbackParams>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let state = state_lock.read().await.clone();

    let code = params
        .code
        .ok_or_else(|| ApiError::BadRequest("Authorization code is required".to_string()))?;

    let access_token = state.spotify_service.exchange_code(&code).await?;

    info!("Spotify authorization code exchanged");

    Ok(Json(serde_json::json!({
        "success": true,
        "accessToken": access_token,
    })))
}

/// GET /api/spotify/trending?accessToken&page&limit - Proxy the user's
/// top tracks (medium-term window)
pub async fn trending(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Query(params): Query<TrendingParams>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let state = state_lock.read().await.clone();

    let access_token = params
        .access_token
        .ok_or_else(|| ApiError::Unauthorized("User access token is required".to_string()))?;

    let page = params.page.unwrap_or(1).max(1);
    let limit = params.limit.unwrap_or(30).clamp(1, 50);

    debug!(page = page, limit = limit, "Fetching trending tracks");

    let result = state
        .spotify_service
        .top_tracks(&access_token, page, limit)
        .await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "data": result,
    })))
}

/// GET /api/spotify/search?query&accessToken&page&limit - Proxy track search
pub async fn search(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let state = state_lock.read().await.clone();

    let access_token = params
        .access_token
        .ok_or_else(|| ApiError::Unauthorized("User access token is required".to_string()))?;

    let query = params
        .query
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("Search query is required".to_string()))?;

    let page = params.page.unwrap_or(1).max(1);
    let limit = params.limit.unwrap_or(50).clamp(1, 50);
    let offset = (page - 1) * limit;

    debug!(query = %query, page = page, limit = limit, offset = offset, "Searching tracks");

    let result = state
        .spotify_service
        .search_tracks(&query, &access_token, offset, limit)
        .await?;

    let total_pages = (result.total as f64 / limit as f64).ceil() as i64;

    Ok(Json(serde_json::json!({
        "success": true,
        "data": {
            "items": result.items,
            "total": result.total,
            "page": page,
            "limit": limit,
            "totalPages": total_pages,
        },
    })))
}
