//! Account storage
//!
//! The user store is an external collaborator behind the [`UserStore`]
//! trait: the endpoints only need find and insert operations, and the
//! store's own unique constraints are the authoritative uniqueness
//! guarantee when concurrent signups race past the endpoint-level check.

mod memory;
mod postgres;

pub use memory::MemoryUserStore;
pub use postgres::PgUserStore;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered account as stored
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub image: String,
}

/// An account's representation safe to return to a client.
///
/// The password field is always the empty string rather than omitted, so
/// the response shape stays stable for clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub image: String,
    pub password: String,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            username: user.username.clone(),
            image: user.image.clone(),
            password: String::new(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Account already exists")]
    Duplicate,
    #[error("Store error: {0}")]
    Backend(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            // PostgreSQL unique violation
            if db_err.code().as_deref() == Some("23505") {
                return StoreError::Duplicate;
            }
        }
        StoreError::Backend(err.to_string())
    }
}

/// Abstract account repository
#[async_trait::async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;
    async fn insert(&self, user: &User) -> Result<(), StoreError>;

    /// Connectivity check for health probes
    async fn ping(&self) -> Result<(), StoreError>;
}
