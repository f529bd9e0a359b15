// src/services/spotify.rs

use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, error, info};

use crate::common::{safe_token_log, ApiError};

const SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const SPOTIFY_TOP_TRACKS_URL: &str = "https://api.spotify.com/v1/me/top/tracks";
const SPOTIFY_SEARCH_URL: &str = "https://api.spotify.com/v1/search";

#[derive(Debug, Error)]
pub enum SpotifyError {
    #[error("Spotify request failed: {0}")]
    RequestFailed(String),

    #[error("Spotify returned an error: {0}")]
    Upstream(String),

    #[error("Malformed Spotify response: {0}")]
    MalformedResponse(String),

    #[error("No tracks found")]
    NoTracksFound,
}

impl From<SpotifyError> for ApiError {
    fn from(e: SpotifyError) -> Self {
        match e {
            SpotifyError::NoTracksFound => ApiError::NotFound(e.to_string()),
            other => ApiError::UpstreamError(other.to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SpotifyTokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    expires_in: i64,
}

/// Cached user token entry: refresh token plus absolute expiry
#[derive(Debug, Clone)]
struct CachedToken {
    refresh_token: Option<String>,
    expires_at: DateTime<Utc>,
}

/// One page of the user's top tracks
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendingPage {
    pub tracks: Vec<serde_json::Value>,
    pub total: i64,
    pub page: u32,
    pub limit: u32,
    pub has_more: bool,
}

/// One page of track search results, fields verbatim from the provider
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchPage {
    pub items: Vec<serde_json::Value>,
    pub total: i64,
    pub limit: u32,
    pub offset: u32,
}

#[derive(Debug, Deserialize)]
struct TopTracksResponse {
    #[serde(default)]
    items: Vec<Option<serde_json::Value>>,
    #[serde(default)]
    total: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    tracks: Option<SearchPage>,
}

/// Gateway to the Spotify Web API: code-for-token exchange plus
/// top-tracks and search proxying. Holds a process-local token cache
/// keyed by access token; entries carry a TTL and expired ones are
/// swept on every insert.
pub struct SpotifyService {
    http: Client,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    token_cache: RwLock<HashMap<String, CachedToken>>,
}

impl SpotifyService {
    pub fn new(http: Client, client_id: String, client_secret: String, redirect_uri: String) -> Self {
        Self {
            http,
            client_id,
            client_secret,
            redirect_uri,
            token_cache: RwLock::new(HashMap::new()),
        }
    }

    /// Exchange an authorization code for a user access token.
    /// The {refresh token, expiry} pair is cached in process memory keyed by
    /// the access token; only the access token is returned to the caller.
    pub async fn exchange_code(&self, code: &str) -> Result<String, SpotifyError> {
        let params = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", &self.redirect_uri),
        ];

        let response = self
            .http
            .post(SPOTIFY_TOKEN_URL)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&params)
            .send()
            .await
            .map_err(|e| SpotifyError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!(status = %status, error = %error_text, "Spotify token exchange failed");
            return Err(SpotifyError::Upstream(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let token: SpotifyTokenResponse = response
            .json()
            .await
            .map_err(|e| SpotifyError::MalformedResponse(e.to_string()))?;

        let expires_at = Utc::now() + Duration::seconds(token.expires_in);
        self.cache_token(token.access_token.clone(), token.refresh_token, expires_at)
            .await;

        info!(
            token = %safe_token_log(&token.access_token),
            "Spotify user access token issued and cached"
        );

        Ok(token.access_token)
    }

    /// Fetch one page of the user's top tracks (medium-term window).
    /// Null entries are dropped; an empty page is an error, not an empty list.
    pub async fn top_tracks(
        &self,
        access_token: &str,
        page: u32,
        limit: u32,
    ) -> Result<TrendingPage, SpotifyError> {
        let offset = (page.saturating_sub(1)) * limit;

        debug!(page = page, limit = limit, offset = offset, "Fetching top tracks");

        let response = self
            .http
            .get(SPOTIFY_TOP_TRACKS_URL)
            .bearer_auth(access_token)
            .query(&[
                ("time_range", "medium_term".to_string()),
                ("limit", limit.to_string()),
                ("offset", offset.to_string()),
            ])
            .send()
            .await
            .map_err(|e| SpotifyError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!(status = %status, error = %error_text, "Spotify top tracks request failed");
            return Err(SpotifyError::Upstream(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let body: TopTracksResponse = response
            .json()
            .await
            .map_err(|e| SpotifyError::MalformedResponse(e.to_string()))?;

        let tracks = filter_tracks(body.items);
        if tracks.is_empty() {
            return Err(SpotifyError::NoTracksFound);
        }

        let total = body.total.unwrap_or(tracks.len() as i64);

        Ok(TrendingPage {
            has_more: has_more(page, limit, total),
            tracks,
            total,
            page,
            limit,
        })
    }

    /// Search tracks, returning the provider's page fields verbatim
    pub async fn search_tracks(
        &self,
        query: &str,
        access_token: &str,
        offset: u32,
        limit: u32,
    ) -> Result<SearchPage, SpotifyError> {
        let response = self
            .http
            .get(SPOTIFY_SEARCH_URL)
            .bearer_auth(access_token)
            .query(&[
                ("q", query.to_string()),
                ("type", "track".to_string()),
                ("limit", limit.to_string()),
                ("offset", offset.to_string()),
            ])
            .send()
            .await
            .map_err(|e| SpotifyError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!(status = %status, error = %error_text, "Spotify search request failed");
            return Err(SpotifyError::Upstream(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| SpotifyError::MalformedResponse(e.to_string()))?;

        body.tracks.ok_or(SpotifyError::NoTracksFound)
    }

    async fn cache_token(
        &self,
        access_token: String,
        refresh_token: Option<String>,
        expires_at: DateTime<Utc>,
    ) {
        let mut cache = self.token_cache.write().await;
        // Sweep expired entries so the cache cannot grow without bound
        let now = Utc::now();
        cache.retain(|_, entry| entry.expires_at > now);
        cache.insert(
            access_token,
            CachedToken {
                refresh_token,
                expires_at,
            },
        );
    }

    /// Refresh token for a live cached access token, if any
    #[cfg(test)]
    async fn cached_refresh_token(&self, access_token: &str) -> Option<String> {
        let cache = self.token_cache.read().await;
        cache
            .get(access_token)
            .filter(|entry| entry.expires_at > Utc::now())
            .and_then(|entry| entry.refresh_token.clone())
    }

    #[cfg(test)]
    async fn cache_len(&self) -> usize {
        self.token_cache.read().await.len()
    }
}

/// hasMore per the gateway contract: (page * pageSize) < total
fn has_more(page: u32, limit: u32, total: i64) -> bool {
    (page as i64) * (limit as i64) < total
}

fn filter_tracks(items: Vec<Option<serde_json::Value>>) -> Vec<serde_json::Value> {
    items.into_iter().flatten().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_service() -> SpotifyService {
        SpotifyService::new(
            Client::new(),
            "client-id".to_string(),
            "client-secret".to_string(),
            "http://localhost:5174/callback".to_string(),
        )
    }

    #[test]
    fn test_has_more_pagination_boundary() {
        assert!(has_more(1, 30, 31));
        assert!(!has_more(1, 30, 30));
        assert!(has_more(2, 30, 61));
        assert!(!has_more(2, 30, 60));
        assert!(!has_more(1, 30, 0));
    }

    #[test]
    fn test_filter_tracks_drops_null_entries() {
        let items = vec![Some(json!({"id": "t1"})), None, Some(json!({"id": "t2"}))];
        let tracks = filter_tracks(items);
        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0]["id"], "t1");
        assert_eq!(tracks[1]["id"], "t2");
    }

    #[tokio::test]
    async fn test_cache_returns_live_refresh_token() {
        let service = test_service();
        service
            .cache_token(
                "access-1".to_string(),
                Some("refresh-1".to_string()),
                Utc::now() + Duration::hours(1),
            )
            .await;

        assert_eq!(
            service.cached_refresh_token("access-1").await,
            Some("refresh-1".to_string())
        );
        assert_eq!(service.cached_refresh_token("unknown").await, None);
    }

    #[tokio::test]
    async fn test_cache_sweeps_expired_entries_on_insert() {
        let service = test_service();
        service
            .cache_token(
                "stale".to_string(),
                Some("refresh-stale".to_string()),
                Utc::now() - Duration::seconds(1),
            )
            .await;
        assert_eq!(service.cache_len().await, 1);

        // Inserting a fresh entry evicts the expired one
        service
            .cache_token(
                "fresh".to_string(),
                Some("refresh-fresh".to_string()),
                Utc::now() + Duration::hours(1),
            )
            .await;

        assert_eq!(service.cache_len().await, 1);
        assert_eq!(service.cached_refresh_token("stale").await, None);
        assert_eq!(
            service.cached_refresh_token("fresh").await,
            Some("refresh-fresh".to_string())
        );
    }

    #[tokio::test]
    async fn test_expired_entry_is_not_served_even_before_sweep() {
        let service = test_service();
        service
            .cache_token(
                "expired".to_string(),
                Some("refresh".to_string()),
                Utc::now() - Duration::seconds(1),
            )
            .await;

        assert_eq!(service.cached_refresh_token("expired").await, None);
    }
}
