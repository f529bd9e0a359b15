// src/profile/handlers/avatar.rs

use axum::{
    extract::{Extension, Json, Multipart, Path},
    http::StatusCode,
    response::IntoResponse,
};
use infer::Infer;
use sqlx::SqlitePool;
use std::sync::Arc;
use tokio::fs as tokio_fs;
use tokio::sync::RwLock;
use tracing::{error, info};

use super::super::models::AvatarUploadResponse;
use crate::auth::AuthedUser;
use crate::common::{generate_raw_id, ApiError, AppState};

/// POST /api/upload-profile-picture - Upload a profile picture
///
/// Accepts one multipart `image` field, at most 5MB, sniffed content type
/// in {jpeg, jpg, png, gif}.
pub async fn upload_profile_picture(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    mut multipart: Multipart,
) -> Result<Json<AvatarUploadResponse>, ApiError> {
    let state = state_lock.read().await.clone();

    info!(user_id = %authed.id, "Profile picture upload initiated");

    const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| ApiError::BadRequest("Malformed multipart body".to_string()))?
    {
        if field.name() == Some("image") {
            let filename = field
                .file_name()
                .ok_or_else(|| ApiError::ValidationError("No filename provided".to_string()))?
                .to_string();

            let data = field
                .bytes()
                .await
                .map_err(|_| ApiError::BadRequest("Failed to read file data".to_string()))?;

            if data.len() > MAX_FILE_SIZE {
                return Err(ApiError::ValidationError(
                    "File size exceeds 5MB limit".to_string(),
                ));
            }

            if !is_valid_image_type(&data) {
                return Err(ApiError::ValidationError(
                    "Invalid image type. Only JPEG, PNG, and GIF are supported".to_string(),
                ));
            }

            let picture_url = save_picture_file(&state, &authed.id, &data, &filename).await?;
            update_user_picture(&state.db, &authed.id, &picture_url).await?;

            info!(
                user_id = %authed.id,
                picture_url = %picture_url,
                "Profile picture uploaded successfully"
            );

            return Ok(Json(AvatarUploadResponse {
                profile_picture: picture_url,
                message: "Profile picture uploaded successfully".to_string(),
            }));
        }
    }

    Err(ApiError::ValidationError(
        "No image file found in request".to_string(),
    ))
}

/// GET /api/avatars/:filename - Serve stored profile pictures
pub async fn serve_avatar(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Path(filename): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let state = state_lock.read().await.clone();

    // Sanitize filename to prevent path traversal
    let safe_filename = sanitize_filename(&filename);
    let file_path = state.avatars_dir.join(&safe_filename);

    if !file_path.exists() {
        return Err(ApiError::NotFound("Profile picture not found".to_string()));
    }

    let file_content = tokio_fs::read(&file_path)
        .await
        .map_err(|_| ApiError::InternalServer("Failed to read picture file".to_string()))?;

    let content_type = get_content_type_from_extension(&safe_filename);

    Ok((
        StatusCode::OK,
        [
            ("Content-Type", content_type),
            ("Cache-Control", "public, max-age=31536000"),
        ],
        file_content,
    ))
}

// ============================================================================
// Helper Functions
// ============================================================================

async fn save_picture_file(
    state: &AppState,
    user_id: &str,
    data: &[u8],
    original_filename: &str,
) -> Result<String, ApiError> {
    let extension = get_extension_from_filename(original_filename).unwrap_or("jpg");
    let filename = format!("avatar_{}_{}.{}", user_id, generate_raw_id(8), extension);
    let file_path = state.avatars_dir.join(&filename);

    tokio_fs::write(&file_path, data).await.map_err(|e| {
        error!(error = %e, file_path = %file_path.display(), "Failed to save picture file");
        ApiError::InternalServer("Failed to save picture file".to_string())
    })?;

    // Relative URL; the client prepends the API base
    Ok(format!("/api/avatars/{}", filename))
}

async fn update_user_picture(
    pool: &SqlitePool,
    user_id: &str,
    picture_url: &str,
) -> Result<(), ApiError> {
    sqlx::query("UPDATE users SET profile_picture = ? WHERE id = ?")
        .bind(picture_url)
        .bind(user_id)
        .execute(pool)
        .await
        .map_err(ApiError::DatabaseError)?;

    Ok(())
}

fn is_valid_image_type(data: &[u8]) -> bool {
    let infer = Infer::new();
    if let Some(info) = infer.get(data) {
        matches!(
            info.mime_type(),
            "image/jpeg" | "image/jpg" | "image/png" | "image/gif"
        )
    } else {
        false
    }
}

fn get_content_type_from_extension(filename: &str) -> &'static str {
    match filename.split('.').last() {
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ => "image/jpeg",
    }
}

fn get_extension_from_filename(filename: &str) -> Option<&str> {
    filename
        .split('.')
        .last()
        .filter(|ext| matches!(*ext, "jpg" | "jpeg" | "png" | "gif"))
}

fn sanitize_filename(filename: &str) -> String {
    // Remove path traversal sequences and directory separators
    let cleaned = filename
        .replace("..", "")
        .replace('/', "")
        .replace('\\', "")
        .replace('\0', "");

    let sanitized: String = cleaned
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '.' || *c == '-' || *c == '_')
        .collect();

    let max_length = 255;
    let truncated = if sanitized.len() > max_length {
        sanitized.chars().take(max_length).collect()
    } else {
        sanitized
    };

    if truncated.is_empty() {
        "sanitized_file".to_string()
    } else {
        truncated
    }
}
