//! Core use-case services.
//!
//! # Responsibility
//! - Drive the browse engine for one session.
//! - Read and persist display preferences.
//! - Keep CLI/UI layers decoupled from search and storage details.

pub mod browse_service;
pub mod preference_service;
