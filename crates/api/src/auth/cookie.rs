//! Session cookie construction
//!
//! The session token travels in a single HTTP-only cookie scoped to the
//! whole site with a strict same-site policy. Clearing is done by name
//! and is idempotent.

use axum_extra::extract::cookie::{Cookie, SameSite};
use time::Duration;

/// Session cookie name
pub const SESSION_COOKIE_NAME: &str = "rg_session";

/// Build the session cookie carrying a freshly issued token.
///
/// The cookie lifetime matches the token expiry so the browser drops it
/// when the token would no longer verify anyway.
pub fn session_cookie(token: String, ttl_seconds: i64) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .max_age(Duration::seconds(ttl_seconds))
        .into()
}

/// Build a removal cookie that expires the session cookie client-side,
/// whether or not one was ever set
pub fn expired_session_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .max_age(Duration::ZERO)
        .into()
}
