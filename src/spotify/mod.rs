//! # Spotify Module
//!
//! HTTP surface of the Music Catalog Gateway: code exchange, trending
//! (top tracks) proxy, and track search proxy. The upstream calls live in
//! `services::spotify`.

pub mod handlers;
pub mod models;
pub mod routes;

#[cfg(test)]
mod tests;

pub use routes::spotify_routes;
