//! # Reviews Module
//!
//! Star ratings and text reviews tied to one user and one Spotify track,
//! with a one-review-per-user-per-track upsert invariant.

pub mod handlers;
pub mod models;
pub mod routes;
pub mod validators;


pub use routes::reviews_routes;
