// src/profile/models.rs

use serde::{Deserialize, Serialize};

use crate::auth::User;

/// Full own-profile view, only ever returned to the authenticated owner
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub google_id: String,
    pub username: Option<String>,
    pub display_name: String,
    pub email: String,
    pub profile_picture: Option<String>,
    pub created_at: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            google_id: user.google_id,
            username: user.username,
            display_name: user.display_name,
            email: user.email,
            profile_picture: user.profile_picture,
            created_at: user.created_at,
        }
    }
}

/// Public identity summary: never exposes google_id or email
#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: String,
    pub username: Option<String>,
    pub display_name: String,
    pub profile_picture: Option<String>,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            display_name: user.display_name,
            profile_picture: user.profile_picture,
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct SetUsernameRequest {
    pub username: String,
}

#[derive(Deserialize, Debug)]
pub struct UserSearchQuery {
    pub q: Option<String>,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PublicProfileResponse {
    pub user: UserSummary,
    pub friends: Vec<UserSummary>,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AvatarUploadResponse {
    pub profile_picture: String,
    pub message: String,
}
