// src/friends/models.rs

use serde::{Deserialize, Serialize};

/// Body for both add and remove operations
#[derive(Deserialize, Debug)]
pub struct FriendRequest {
    pub friend_id: String,
}

/// Friend summary as returned from GET /api/friends. Unlike the public
/// search summary this includes the email, per the friends-list contract.
#[derive(Serialize, Debug, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct FriendSummary {
    pub id: String,
    pub username: Option<String>,
    pub display_name: String,
    pub profile_picture: Option<String>,
    pub email: String,
}

#[derive(Serialize, Debug)]
pub struct MessageResponse {
    pub message: String,
}
