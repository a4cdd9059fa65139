//! Application state shared across handlers

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::{
    jwt::{JwtConfig, JwtService},
    repositories::{MedicationRepository, ReminderRepository, UserRepository},
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub jwt_service: JwtService,
    /// Tokens presented to logout, with their expiry in epoch seconds
    pub revoked_tokens: Arc<RwLock<HashMap<String, u64>>>,
    pub user_repository: UserRepository,
    pub medication_repository: MedicationRepository,
    pub reminder_repository: ReminderRepository,
}

impl AppState {
    /// Build the state for a given token configuration
    pub fn new(jwt_config: JwtConfig) -> Self {
        Self {
            jwt_service: JwtService::new(jwt_config),
            revoked_tokens: Arc::new(RwLock::new(HashMap::new())),
            user_repository: UserRepository::new(),
            medication_repository: MedicationRepository::new(),
            reminder_repository: ReminderRepository::new(),
        }
    }

    /// Revoke a token until it expires
    ///
    /// Entries for tokens that no longer validate are dropped on the way.
    pub async fn revoke(&self, token: &str, expires_at: u64) {
        let now = u64::try_from(Utc::now().timestamp()).unwrap_or(0);
        let leeway = self.jwt_service.leeway();

        let mut revoked = self.revoked_tokens.write().await;
        revoked.retain(|_, exp| exp.saturating_add(leeway) >= now);
        revoked.insert(token.to_string(), expires_at);
    }

    /// Check if a token has been revoked
    pub async fn is_revoked(&self, token: &str) -> bool {
        self.revoked_tokens.read().await.contains_key(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> AppState {
        AppState::new(JwtConfig {
            secret: "state-secret".to_string(),
            token_expiry: 3600,
        })
    }

    #[tokio::test]
    async fn test_revoked_token_is_rejected() {
        let state = state();
        let exp = Utc::now().timestamp() as u64 + 3600;

        assert!(!state.is_revoked("t1").await);
        state.revoke("t1", exp).await;
        assert!(state.is_revoked("t1").await);
    }

    #[tokio::test]
    async fn test_expired_revocations_are_dropped() {
        let state = state();
        let exp = Utc::now().timestamp() as u64 + 3600;

        state.revoke("long-expired", 1).await;
        state.revoke("fresh", exp).await;

        assert!(!state.is_revoked("long-expired").await);
        assert!(state.is_revoked("fresh").await);
        assert_eq!(state.revoked_tokens.read().await.len(), 1);
    }
}
