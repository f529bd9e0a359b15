// src/reviews/validators.rs

use super::models::UpsertReviewRequest;
use crate::common::{ValidationResult, Validator};

// ============================================================================
// Review Validators
// ============================================================================

pub struct ReviewValidator;

impl Validator<UpsertReviewRequest> for ReviewValidator {
    fn validate(&self, data: &UpsertReviewRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        // Rating is a 1-5 star scale, both bounds inclusive
        if !(1..=5).contains(&data.rating) {
            result.add_error("rating", "Rating must be between 1 and 5");
        }

        if data.spotify_track_id.trim().is_empty() {
            result.add_error("spotifyTrackId", "Track id is required");
        }

        if data.track_name.trim().is_empty() {
            result.add_error("trackName", "Track name is required");
        }

        if data.artist_name.trim().is_empty() {
            result.add_error("artistName", "Artist name is required");
        }

        if data.album_image.trim().is_empty() {
            result.add_error("albumImage", "Album image is required");
        }

        if let Some(text) = &data.review_text {
            if text.len() > 5000 {
                result.add_error("reviewText", "Review text must be less than 5000 characters");
            }
        }

        result
    }
}
