//! Shared application state

use std::sync::Arc;

use crate::auth::JwtManager;
use crate::config::Config;
use crate::store::UserStore;

/// Application state shared across all request handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub users: Arc<dyn UserStore>,
    pub jwt: JwtManager,
}

impl AppState {
    pub fn new(config: Config, users: Arc<dyn UserStore>) -> Self {
        let jwt = JwtManager::new(&config.jwt_secret, config.session_ttl_days);
        Self {
            config: Arc::new(config),
            users,
            jwt,
        }
    }
}
