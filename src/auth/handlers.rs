//! Authentication handlers

use axum::extract::{Extension, Query};
use axum::response::Redirect;
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

use super::models::{Claims, User};
use crate::common::{generate_user_id, safe_email_log, ApiError, AppState};
use crate::services::google::GoogleProfile;

/// GET /auth/google
/// Redirects the end user to Google's authorization page
pub async fn google_oauth_start(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
) -> Redirect {
    let state = state_lock.read().await;

    let auth_url = state.google_service.authorization_url();
    info!("Starting Google OAuth flow");

    Redirect::to(&auth_url)
}

/// GET /auth/google/callback
/// Completes the OAuth handoff: exchanges the authorization code, resolves
/// or creates the user record, mints the session credential, and redirects
/// back to the client with `?token=`.
///
/// Failure paths redirect rather than erroring:
/// - provider error / missing code / unusable profile -> {CLIENT_URL}/login/failed
/// - credential signing failure -> {CLIENT_URL}/login/error
pub async fn google_oauth_callback(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Redirect, ApiError> {
    let state = state_lock.read().await.clone();

    if let Some(oauth_error) = params.get("error") {
        warn!(oauth_error = %oauth_error, "Google OAuth returned error");
        return Ok(Redirect::to(&format!("{}/login/failed", state.client_url)));
    }

    let code = match params.get("code") {
        Some(c) => c,
        None => {
            warn!("No authorization code in OAuth callback");
            return Ok(Redirect::to(&format!("{}/login/failed", state.client_url)));
        }
    };

    // Exchange the code and fetch the verified profile. Nothing is created
    // until the provider has vouched for the identity.
    let token_response = match state.google_service.exchange_code(code).await {
        Ok(t) => t,
        Err(e) => {
            error!(error = %e, "Failed to exchange authorization code with Google");
            return Ok(Redirect::to(&format!("{}/login/failed", state.client_url)));
        }
    };

    let profile = match state
        .google_service
        .fetch_profile(&token_response.access_token)
        .await
    {
        Ok(p) => p,
        Err(e) => {
            error!(error = %e, "Failed to fetch Google profile");
            return Ok(Redirect::to(&format!("{}/login/failed", state.client_url)));
        }
    };

    // Display name and email are required fields on the user record
    let (email, display_name) = match (&profile.email, &profile.name) {
        (Some(email), Some(name)) => (email.clone(), name.clone()),
        _ => {
            warn!(
                has_email = profile.email.is_some(),
                has_name = profile.name.is_some(),
                "Google profile missing required fields"
            );
            return Ok(Redirect::to(&format!("{}/login/failed", state.client_url)));
        }
    };

    let user = find_or_create_user(&state, &profile, &email, &display_name).await?;

    // Mint the 24-hour session credential
    let exp = (Utc::now() + Duration::hours(24)).timestamp() as usize;
    let claims = Claims {
        sub: user.id.clone(),
        name: user.display_name.clone(),
        email: user.email.clone(),
        exp,
    };

    let token = match encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(state.jwt_secret.as_bytes()),
    ) {
        Ok(t) => t,
        Err(e) => {
            error!(error = %e, user_id = %user.id, "JWT encoding error during authentication");
            return Ok(Redirect::to(&format!("{}/login/error", state.client_url)));
        }
    };

    info!(
        user_id = %user.id,
        email = %safe_email_log(&user.email),
        "User authentication successful via Google OAuth"
    );

    Ok(Redirect::to(&format!(
        "{}/auth/callback?token={}",
        state.client_url,
        urlencoding::encode(&token)
    )))
}

/// Resolve the user by external subject identifier, creating the record on
/// first login. Idempotent: repeat logins with the same google_id always
/// resolve to the existing record.
async fn find_or_create_user(
    state: &AppState,
    profile: &GoogleProfile,
    email: &str,
    display_name: &str,
) -> Result<User, ApiError> {
    let existing: Option<User> =
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE google_id = ?")
            .bind(&profile.id)
            .fetch_optional(&state.db)
            .await
            .map_err(|e| {
                error!(
                    error = %e,
                    google_id = %profile.id,
                    "Database error checking existing user during OAuth flow"
                );
                ApiError::DatabaseError(e)
            })?;

    if let Some(user) = existing {
        debug!(user_id = %user.id, "Found existing user in database");
        return Ok(user);
    }

    let id = generate_user_id();
    info!(
        user_id = %id,
        email = %safe_email_log(email),
        "Creating new user account via Google OAuth"
    );

    sqlx::query(
        "INSERT INTO users (id, google_id, email, display_name, profile_picture) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(&profile.id)
    .bind(email)
    .bind(display_name)
    .bind(profile.picture.as_deref())
    .execute(&state.db)
    .await
    .map_err(|e| {
        error!(
            error = %e,
            user_id = %id,
            "Database error inserting new user during OAuth flow"
        );
        ApiError::DatabaseError(e)
    })?;

    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(&id)
        .fetch_one(&state.db)
        .await
        .map_err(|e| {
            error!(
                error = %e,
                user_id = %id,
                "Database error fetching newly created user during OAuth flow"
            );
            ApiError::DatabaseError(e)
        })
}
