// src/friends/routes.rs

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers;

pub fn friends_routes() -> Router {
    Router::new()
        .route("/api/friends", get(handlers::list_friends))
        .route("/api/friends/add", post(handlers::add_friend))
        .route("/api/friends/remove", post(handlers::remove_friend))
}
