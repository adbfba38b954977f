//! Authentication routes

use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    auth::{
        expired_session_cookie, hash_password, session_cookie, validate_login, validate_signup,
        verify_password, SessionUser,
    },
    error::{ApiError, ApiResult},
    state::AppState,
    store::{PublicUser, User},
};

/// Default profile pictures assigned uniformly at random at signup
const PROFILE_PICS: [&str; 3] = ["/avatar1.png", "/avatar2.png", "/avatar3.png"];

// =============================================================================
// Request/Response Types
// =============================================================================

// Fields default to empty strings so absent fields surface as the
// validator's 400 rather than a deserialization rejection

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub username: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub success: bool,
    pub user: PublicUser,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

// =============================================================================
// Handlers
// =============================================================================

/// Register a new account and open a session
pub async fn signup(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<SignupRequest>,
) -> ApiResult<(CookieJar, (StatusCode, Json<AuthResponse>))> {
    validate_signup(&req.email, &req.password, &req.username)
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    // Fast-path friendly errors; the store's unique constraints remain the
    // authoritative check under concurrency
    if state.users.find_by_email(&req.email).await?.is_some() {
        return Err(ApiError::EmailTaken);
    }
    if state.users.find_by_username(&req.username).await?.is_some() {
        return Err(ApiError::UsernameTaken);
    }

    let password_hash = hash_password(&req.password).map_err(|e| {
        tracing::error!(error = %e, "signup: password hashing failed");
        ApiError::Internal
    })?;

    let image = PROFILE_PICS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(PROFILE_PICS[0]);

    let user = User {
        id: Uuid::new_v4(),
        email: req.email,
        username: req.username,
        password_hash,
        image: image.to_string(),
    };

    // Persist before issuing the token: a failed insert must never leave
    // the caller holding a cookie for an account that does not exist
    state.users.insert(&user).await?;

    let token = state.jwt.generate_session_token(user.id).map_err(|e| {
        tracing::error!(error = %e, "signup: token generation failed");
        ApiError::Internal
    })?;
    let jar = jar.add(session_cookie(token, state.jwt.session_ttl_seconds()));

    tracing::info!(user_id = %user.id, "signup: account created");

    Ok((
        jar,
        (
            StatusCode::CREATED,
            Json(AuthResponse {
                success: true,
                user: PublicUser::from(&user),
            }),
        ),
    ))
}

/// Login with email and password
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> ApiResult<(CookieJar, Json<AuthResponse>)> {
    validate_login(&req.email, &req.password).map_err(|e| ApiError::Validation(e.to_string()))?;

    // Unknown email and wrong password share a message so callers cannot
    // probe for registered addresses
    let user = state.users.find_by_email(&req.email).await?.ok_or_else(|| {
        tracing::warn!("login: no account for submitted email");
        ApiError::UnknownAccount
    })?;

    let valid = verify_password(&req.password, &user.password_hash).map_err(|e| {
        tracing::error!(error = %e, "login: password verification failed");
        ApiError::Internal
    })?;

    if !valid {
        tracing::warn!(user_id = %user.id, "login: invalid password");
        return Err(ApiError::InvalidCredentials);
    }

    let token = state.jwt.generate_session_token(user.id).map_err(|e| {
        tracing::error!(error = %e, "login: token generation failed");
        ApiError::Internal
    })?;
    let jar = jar.add(session_cookie(token, state.jwt.session_ttl_seconds()));

    tracing::info!(user_id = %user.id, "login: session opened");

    Ok((
        jar,
        Json(AuthResponse {
            success: true,
            user: PublicUser::from(&user),
        }),
    ))
}

/// Logout: expire the session cookie client-side.
///
/// Sessions are stateless, so there is nothing to revoke server-side;
/// clearing succeeds whether or not a session existed.
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<MessageResponse>) {
    let jar = jar.add(expired_session_cookie());

    (
        jar,
        Json(MessageResponse {
            success: true,
            message: "Logged out successfully".to_string(),
        }),
    )
}

/// Echo back the account resolved by the session verifier.
///
/// The [`SessionUser`] extractor rejects with 401 if the verifier never
/// ran, so a routing mistake cannot expose this handler unauthenticated.
pub async fn authcheck(SessionUser(user): SessionUser) -> Json<AuthResponse> {
    Json(AuthResponse {
        success: true,
        user,
    })
}
