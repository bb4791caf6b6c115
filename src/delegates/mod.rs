//! # Delegates Module
//!
//! Delegate contact records and their CSV-backed store.

pub mod models;
pub mod store;

pub use models::{DelegateRecord, ResponseStatus};
pub use store::{AddOutcome, DelegateStore, EditedRow, StoreError};
