//! Session verification middleware
//!
//! Runs ahead of every protected route. A request either ends the
//! middleware carrying a [`SessionUser`] extension (hash stripped) or is
//! rejected with a single undifferentiated 401 — missing cookie, bad
//! signature, expired token, and vanished account are deliberately
//! indistinguishable to the caller.

use axum::{
    async_trait,
    body::Body,
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;

use crate::auth::cookie::SESSION_COOKIE_NAME;
use crate::error::ApiError;
use crate::state::AppState;
use crate::store::PublicUser;

/// The authenticated account for this request, public view only
#[derive(Debug, Clone)]
pub struct SessionUser(pub PublicUser);

#[async_trait]
impl<S> FromRequestParts<S> for SessionUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Populated by require_session; absent means the route was wired
        // without the verifier
        parts
            .extensions
            .get::<SessionUser>()
            .cloned()
            .ok_or(ApiError::Unauthorized)
    }
}

/// Middleware that resolves the session cookie to an account.
///
/// Re-evaluated independently on every request; nothing is cached across
/// requests.
pub async fn require_session(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(cookie) = jar.get(SESSION_COOKIE_NAME) else {
        tracing::debug!("session check: no session cookie");
        return Err(ApiError::Unauthorized);
    };

    let claims = state.jwt.validate_token(cookie.value()).map_err(|e| {
        tracing::debug!(error = %e, "session check: token rejected");
        ApiError::Unauthorized
    })?;

    // The account may have been removed out-of-band since issuance
    let user = state
        .users
        .find_by_id(claims.sub)
        .await?
        .ok_or_else(|| {
            tracing::warn!(user_id = %claims.sub, "session check: account no longer exists");
            ApiError::Unauthorized
        })?;

    request
        .extensions_mut()
        .insert(SessionUser(PublicUser::from(&user)));

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{http::StatusCode, middleware::from_fn_with_state, routing::get, Json, Router};
    use tower::ServiceExt;
    use uuid::Uuid;

    use crate::config::Config;
    use crate::store::{MemoryUserStore, User, UserStore};

    fn test_state(users: Arc<MemoryUserStore>) -> AppState {
        let config = Config {
            bind_address: "127.0.0.1:0".to_string(),
            database_url: String::new(),
            database_max_connections: 1,
            jwt_secret: "test-secret-key-at-least-32-chars!".to_string(),
            session_ttl_days: 7,
        };
        AppState::new(config, users)
    }

    async fn whoami(SessionUser(user): SessionUser) -> Json<PublicUser> {
        Json(user)
    }

    fn protected_app(state: AppState) -> Router {
        Router::new()
            .route("/whoami", get(whoami))
            .layer(from_fn_with_state(state.clone(), require_session))
            .with_state(state)
    }

    fn seeded_user() -> User {
        User {
            id: Uuid::new_v4(),
            email: "a@b.com".to_string(),
            username: "alice".to_string(),
            password_hash: "$argon2id$stub".to_string(),
            image: "/avatar1.png".to_string(),
        }
    }

    #[tokio::test]
    async fn test_no_cookie_is_rejected() {
        let state = test_state(Arc::new(MemoryUserStore::default()));
        let app = protected_app(state);

        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .uri("/whoami")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_valid_cookie_resolves_account() {
        let users = Arc::new(MemoryUserStore::default());
        let user = seeded_user();
        users.insert(&user).await.unwrap();

        let state = test_state(users);
        let token = state.jwt.generate_session_token(user.id).unwrap();
        let app = protected_app(state);

        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .uri("/whoami")
                    .header("cookie", format!("{}={}", SESSION_COOKIE_NAME, token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_tampered_cookie_is_rejected() {
        let users = Arc::new(MemoryUserStore::default());
        let user = seeded_user();
        users.insert(&user).await.unwrap();

        let state = test_state(users);
        let mut token = state.jwt.generate_session_token(user.id).unwrap();
        token.push('x');
        let app = protected_app(state);

        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .uri("/whoami")
                    .header("cookie", format!("{}={}", SESSION_COOKIE_NAME, token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_valid_cookie_for_deleted_account_is_rejected() {
        let users = Arc::new(MemoryUserStore::default());
        let user = seeded_user();
        users.insert(&user).await.unwrap();

        let state = test_state(users.clone());
        let token = state.jwt.generate_session_token(user.id).unwrap();
        users.remove(user.id).await;
        let app = protected_app(state);

        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .uri("/whoami")
                    .header("cookie", format!("{}={}", SESSION_COOKIE_NAME, token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
