// src/services/mod.rs
//
// Shared services module containing outbound gateway logic
// that can be used across different domain modules

pub mod google;
pub mod spotify;

// Re-export commonly used types for convenience
pub use google::GoogleService;
pub use spotify::SpotifyService;
