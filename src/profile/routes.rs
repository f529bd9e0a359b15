// src/profile/routes.rs

use axum::{
    routing::{get, post, put},
    Router,
};

use super::handlers::{avatar, profile};

pub fn profile_routes() -> Router {
    Router::new()
        // Own profile
        .route("/api/profile", get(profile::get_profile))
        .route("/api/username", put(profile::set_username))
        // Identity search and public lookup
        .route("/api/user/search", get(profile::search_users))
        .route("/api/user/:username", get(profile::public_profile))
        // Profile pictures
        .route(
            "/api/upload-profile-picture",
            post(avatar::upload_profile_picture),
        )
        .route("/api/avatars/:filename", get(avatar::serve_avatar))
}
