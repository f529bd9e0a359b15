// src/spotify/routes.rs

use axum::{routing::get, Router};

use super::handlers;

pub fn spotify_routes() -> Router {
    Router::new()
        .route("/api/spotify/callback", get(handlers::spotify_callback))
        .route("/api/spotify/trending", get(handlers::trending))
        .route("/api/spotify/search", get(handlers::search))
}
