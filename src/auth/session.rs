//! Session Extraction
//!
//! The session token travels in the `gds_auth` query parameter. Handlers that
//! need an operator take a [`Session`] argument; requests without a valid
//! token are redirected to the login page.

use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
    response::Redirect,
};

use crate::auth::models::SessionQuery;
use crate::server::AppState;

/// Query parameter carrying the session token
pub const SESSION_PARAM: &str = "gds_auth";

/// Authenticated operator for the current request
#[derive(Debug, Clone)]
pub struct Session {
    pub username: String,
    pub token: String,
}

impl Session {
    /// Local link that keeps the session alive
    pub fn link(&self, path: &str) -> String {
        with_token(path, &self.token)
    }
}

/// Append the session token to `path` as a query parameter
pub fn with_token(path: &str, token: &str) -> String {
    let separator = if path.contains('?') { '&' } else { '?' };
    let encoded: String = url::form_urlencoded::byte_serialize(token.as_bytes()).collect();
    format!("{path}{separator}{SESSION_PARAM}={encoded}")
}

impl FromRequestParts<AppState> for Session {
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = Query::<SessionQuery>::try_from_uri(&parts.uri)
            .ok()
            .and_then(|Query(query)| query.token)
            .filter(|token| !token.is_empty());

        let Some(token) = token else {
            tracing::debug!(method = %parts.method, uri = %parts.uri.path(), "No session token, redirecting to login");
            return Err(Redirect::to("/login"));
        };

        match state.tokens.verify(&token) {
            Some(username) => Ok(Session { username, token }),
            None => {
                tracing::warn!(method = %parts.method, uri = %parts.uri.path(), "Invalid session token, redirecting to login");
                Err(Redirect::to("/login"))
            }
        }
    }
}
