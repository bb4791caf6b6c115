//! # Outreach Module
//!
//! Invitation template, prompt construction and the provider fallback chain
//! that personalizes outreach messages.

pub mod generator;
pub mod groq;
pub mod ollama;
pub mod prompt;
pub mod provider;

pub use generator::{GenerationError, MessageGenerator};
pub use prompt::{GenerationRequest, Tone};
