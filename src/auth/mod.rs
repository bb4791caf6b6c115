//! # Authentication Module
//!
//! Static operator credentials, signed session tokens and the per-request
//! session extractor that gates every page except login.

pub mod credentials;
pub mod models;
pub mod session;
pub mod token;

pub use credentials::CredentialStore;
pub use session::Session;
pub use token::TokenCodec;
