//! # Auth Module
//!
//! This module handles all authentication-related functionality including:
//! - Google OAuth login flow
//! - JWT session credential generation and validation
//! - AuthedUser extractor for protected routes

pub mod extractors;
pub mod handlers;
pub mod models;
pub mod routes;


pub use extractors::AuthedUser;
pub use models::User;
pub use routes::auth_routes;
