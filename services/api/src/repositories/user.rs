//! Mock user repository

use chrono::Utc;
use uuid::Uuid;

use common::models::User;

use super::{MOCK_USER_ID, seed_time};

/// User repository backed by static mock data
#[derive(Clone, Default)]
pub struct UserRepository;

impl UserRepository {
    /// Create a new user repository
    pub fn new() -> Self {
        Self
    }

    /// Resolve the account for a login email
    ///
    /// Every email maps to the same mock account; only the email and the
    /// display name derived from it differ.
    pub fn find_by_email(&self, email: &str) -> User {
        User {
            id: MOCK_USER_ID,
            name: display_name(email),
            email: email.to_string(),
            created_at: seed_time(0),
        }
    }

    /// Find a user by ID and the email carried in their token
    pub fn find_by_id(&self, id: Uuid, email: &str) -> User {
        User {
            id,
            name: display_name(email),
            email: email.to_string(),
            created_at: seed_time(0),
        }
    }

    /// Create a new user
    pub fn create(&self, name: &str, email: &str) -> User {
        User {
            id: Uuid::new_v4(),
            name: name.trim().to_string(),
            email: email.to_string(),
            created_at: Utc::now(),
        }
    }
}

fn display_name(email: &str) -> String {
    email.split('@').next().unwrap_or(email).to_string()
}
