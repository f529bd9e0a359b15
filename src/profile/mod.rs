//! # Profile Module
//!
//! Identity-facing surface: own profile, username selection, identity
//! search, public profiles by handle, and profile picture storage.

pub mod handlers;
pub mod models;
pub mod routes;
pub mod validators;

#[cfg(test)]
mod tests;

pub use models::UserSummary;
pub use routes::profile_routes;
