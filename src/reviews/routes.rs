// src/reviews/routes.rs

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers;

pub fn reviews_routes() -> Router {
    Router::new()
        .route("/api/reviews", post(handlers::upsert_review))
        .route("/api/reviews/my-reviews", get(handlers::my_reviews))
        .route("/api/reviews/track/:track_id", get(handlers::review_for_track))
        .route("/api/reviews/user/:user_id", get(handlers::reviews_by_user))
}
