// In-memory session holding the Home Assistant access token
use crate::application::collaborators::SessionStore;
use std::sync::RwLock;

#[derive(Debug, Default)]
pub struct InMemorySession {
    token: RwLock<Option<String>>,
}

impl InMemorySession {
    pub fn new(token: String) -> Self {
        let token = (!token.is_empty()).then_some(token);
        Self {
            token: RwLock::new(token),
        }
    }

    pub fn token(&self) -> Option<String> {
        self.token.read().ok().and_then(|token| token.clone())
    }
}

impl SessionStore for InMemorySession {
    fn clear_credentials(&self) {
        if let Ok(mut token) = self.token.write() {
            *token = None;
        }
        tracing::info!("Session credentials cleared");
    }
}
