//! Reelgate API Library
//!
//! Session-based authentication service for the Reelgate content-browsing
//! application: account signup, credential login, cookie-borne session
//! tokens, and per-request session verification.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod routes;
pub mod state;
pub mod store;

pub use config::Config;
pub use error::{ApiError, ApiResult};
pub use state::AppState;
