//! Repository layer for persisted preferences.
//!
//! # Responsibility
//! - Define the key-value contract used by the preference service.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Only display preferences are persisted; collections never are.

pub mod preference_repo;
