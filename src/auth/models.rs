//! Authentication data models

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// JWT claims: internal user id plus the display name and email the
/// credential was issued for
#[derive(Serialize, Deserialize, Debug)]
pub struct Claims {
    pub sub: String,
    pub name: String,
    pub email: String,
    pub exp: usize,
}

/// User database model
#[derive(FromRow, Serialize, Deserialize, Debug, Clone)]
pub struct User {
    pub id: String,
    pub google_id: String,
    pub username: Option<String>,
    pub email: String,
    pub display_name: String,
    pub profile_picture: Option<String>,
    pub created_at: Option<String>,
}
