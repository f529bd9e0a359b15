//! Shared fixtures for handler tests: an in-memory database with the real
//! schema, a fully wired AppState, and helpers to seed users.

use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::auth::AuthedUser;
use crate::common::{migrations, AppState};
use crate::services::{GoogleService, SpotifyService};

pub async fn test_state() -> Arc<RwLock<AppState>> {
    // Single connection: every pooled connection to :memory: would
    // otherwise get its own empty database
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite");

    migrations::run_migrations(&pool).await.expect("migrations");

    let http = reqwest::Client::new();

    let state = AppState {
        db: pool,
        avatars_dir: std::env::temp_dir(),
        http: http.clone(),
        jwt_secret: "test_secret".to_string(),
        client_url: "http://localhost:5173".to_string(),
        google_service: Arc::new(GoogleService::new(
            http.clone(),
            "google-client".to_string(),
            "google-secret".to_string(),
            "http://localhost:8080/auth/google/callback".to_string(),
        )),
        spotify_service: Arc::new(SpotifyService::new(
            http,
            "spotify-client".to_string(),
            "spotify-secret".to_string(),
            "http://localhost:5174/callback".to_string(),
        )),
    };

    Arc::new(RwLock::new(state))
}

/// Insert a user row and return nothing; pair with `authed_user` to act as them
pub async fn insert_user(
    state: &Arc<RwLock<AppState>>,
    id: &str,
    username: Option<&str>,
    display_name: &str,
) {
    let db = state.read().await.db.clone();
    sqlx::query(
        "INSERT INTO users (id, google_id, username, email, display_name) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(format!("google-{}", id))
    .bind(username)
    .bind(format!("{}@example.com", id))
    .bind(display_name)
    .execute(&db)
    .await
    .expect("insert user");
}

/// A resolved identity, as the extractor would attach it
pub fn authed_user(id: &str, display_name: &str) -> AuthedUser {
    AuthedUser {
        id: id.to_string(),
        email: format!("{}@example.com", id),
        display_name: display_name.to_string(),
    }
}
