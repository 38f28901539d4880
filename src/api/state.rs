use std::sync::Arc;

use super::auth::AuthSecret;
use crate::config::AppConfig;
use crate::verifier::Verifier;

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub verifier: Arc<dyn Verifier>,
    secret: Arc<AuthSecret>,
}

impl AppState {
    pub fn new(config: Arc<AppConfig>, verifier: Arc<dyn Verifier>) -> Self {
        let secret = Arc::new(AuthSecret::new(&config.auth_token));
        Self {
            config,
            verifier,
            secret,
        }
    }

    pub fn secret(&self) -> &AuthSecret {
        &self.secret
    }
}
