//! Authentication module for Reelgate

pub mod cookie;
pub mod jwt;
pub mod middleware;
pub mod password;
pub mod validate;

pub use cookie::{expired_session_cookie, session_cookie, SESSION_COOKIE_NAME};
pub use jwt::{Claims, JwtManager};
pub use middleware::{require_session, SessionUser};
pub use password::{hash_password, verify_password};
pub use validate::{validate_login, validate_signup};
