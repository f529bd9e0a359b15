// src/reviews/models.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::profile::UserSummary;

/// Review database model. Track metadata is denormalized at review time
/// and never re-synced from the catalog.
#[derive(FromRow, Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub user_id: String,
    pub spotify_track_id: String,
    pub track_name: String,
    pub artist_name: String,
    pub album_image: String,
    pub rating: i64,
    pub review_text: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Body of POST /api/reviews
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UpsertReviewRequest {
    pub spotify_track_id: String,
    pub track_name: String,
    pub artist_name: String,
    pub album_image: String,
    pub rating: i64,
    #[serde(default)]
    pub review_text: Option<String>,
}

/// A review annotated with a lightweight reference to its author,
/// used when listing another user's reviews
#[derive(Serialize, Debug)]
pub struct ReviewWithAuthor {
    #[serde(flatten)]
    pub review: Review,
    pub user: UserSummary,
}
