//! Signed Session Tokens
//!
//! Compact `<base64 payload>.<hex HMAC-SHA256>` tokens carrying a username and
//! an expiry. The MAC covers the base64 text, not the decoded JSON.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// Lifetime of a "remember me" token
pub const REMEMBER_ME_TTL_DAYS: i64 = 30;

/// Token payload before encoding
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TokenPayload {
    pub username: String,
    /// Expiry as fractional unix seconds
    pub exp: f64,
}

/// Why a token was refused. Only used for logs and tests; callers of
/// [`TokenCodec::verify`] see a single rejection.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TokenRejection {
    #[error("token is malformed")]
    Malformed,
    #[error("token signature does not match")]
    SignatureMismatch,
    #[error("token has expired")]
    Expired,
}

/// Issues and validates session tokens with a server-held secret
#[derive(Clone)]
pub struct TokenCodec {
    secret: Vec<u8>,
    ttl: Duration,
}

impl TokenCodec {
    /// Create a codec whose default token lifetime is 30 days
    pub fn new(secret: &str) -> Self {
        Self {
            secret: secret.as_bytes().to_vec(),
            ttl: Duration::days(REMEMBER_ME_TTL_DAYS),
        }
    }

    /// Issue a token for `username` valid for the default lifetime
    pub fn issue(&self, username: &str) -> String {
        self.issue_for(username, self.ttl)
    }

    /// Issue a token valid for `ttl` from now
    pub fn issue_for(&self, username: &str, ttl: Duration) -> String {
        self.issue_with_expiry(username, Utc::now() + ttl)
    }

    pub fn issue_with_expiry(&self, username: &str, expiry: DateTime<Utc>) -> String {
        let payload = TokenPayload {
            username: username.to_string(),
            exp: expiry.timestamp_millis() as f64 / 1000.0,
        };
        // Serializing a struct of a string and a float cannot fail
        let json = serde_json::to_string(&payload).unwrap_or_default();
        let encoded = STANDARD.encode(json);
        let signature = hex::encode(self.mac(encoded.as_bytes()).finalize().into_bytes());
        format!("{encoded}.{signature}")
    }

    /// Validate a token and return its username.
    ///
    /// Malformed, tampered and expired tokens are all reported as `None`.
    pub fn verify(&self, token: &str) -> Option<String> {
        match self.inspect(token, Utc::now()) {
            Ok(username) => Some(username),
            Err(reason) => {
                tracing::debug!(%reason, "Rejected session token");
                None
            }
        }
    }

    /// Validate a token against `now`, keeping the rejection reason.
    pub(crate) fn inspect(&self, token: &str, now: DateTime<Utc>) -> Result<String, TokenRejection> {
        let (encoded, signature) = token.split_once('.').ok_or(TokenRejection::Malformed)?;
        // Signatures are issued as lowercase hex; any other spelling is not ours
        if !signature.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')) {
            return Err(TokenRejection::Malformed);
        }
        let signature = hex::decode(signature).map_err(|_| TokenRejection::Malformed)?;

        // verify_slice compares in constant time
        self.mac(encoded.as_bytes())
            .verify_slice(&signature)
            .map_err(|_| TokenRejection::SignatureMismatch)?;

        let raw = STANDARD.decode(encoded).map_err(|_| TokenRejection::Malformed)?;
        let payload: TokenPayload =
            serde_json::from_slice(&raw).map_err(|_| TokenRejection::Malformed)?;

        let now_secs = now.timestamp_millis() as f64 / 1000.0;
        if payload.exp <= now_secs {
            return Err(TokenRejection::Expired);
        }
        Ok(payload.username)
    }

    fn mac(&self, data: &[u8]) -> HmacSha256 {
        let mut mac = HmacSha256::new_from_slice(&self.secret).expect("HMAC can take key of any size");
        mac.update(data);
        mac
    }
}
