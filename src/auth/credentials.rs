//! Operator credentials loaded once at startup.

use std::collections::HashMap;

use crate::config::AuthConfig;

/// Static username to password mapping
#[derive(Debug, Clone, Default)]
pub struct CredentialStore {
    users: HashMap<String, String>,
}

impl CredentialStore {
    pub fn from_config(config: &AuthConfig) -> Self {
        Self::default().with_user(&config.username, &config.password)
    }

    pub fn with_user(mut self, username: &str, password: &str) -> Self {
        self.users.insert(username.to_string(), password.to_string());
        self
    }

    /// Exact match on both username and password
    pub fn authenticate(&self, username: &str, password: &str) -> bool {
        self.users
            .get(username)
            .is_some_and(|expected| expected == password)
    }
}
