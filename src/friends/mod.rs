//! # Friends Module
//!
//! Social graph between identities. Edges are directed: adding a friend
//! mutates only the caller's own list.

pub mod handlers;
pub mod models;
pub mod routes;


pub use routes::friends_routes;
