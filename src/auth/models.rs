//! Authentication Models
//!
//! Form and query payloads used by the login flow.

use serde::Deserialize;

/// Login form payload. Missing fields decode as empty and fail authentication.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    /// Checkbox value, present only when ticked
    pub remember_me: Option<String>,
}

impl LoginForm {
    pub fn remember(&self) -> bool {
        self.remember_me.is_some()
    }
}

/// Query string carrying the session token
#[derive(Debug, Default, Deserialize)]
pub struct SessionQuery {
    #[serde(rename = "gds_auth")]
    pub token: Option<String>,
}
