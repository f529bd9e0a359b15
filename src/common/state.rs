// Application state shared across all modules

use reqwest::Client;
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::sync::Arc;

use crate::services::{GoogleService, SpotifyService};

/// Application state containing the database pool, outbound HTTP client,
/// gateway services, and environment-driven configuration
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub avatars_dir: PathBuf,
    pub http: Client,
    pub jwt_secret: String,
    pub client_url: String,
    pub google_service: Arc<GoogleService>,
    pub spotify_service: Arc<SpotifyService>,
}
