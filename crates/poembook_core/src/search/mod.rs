//! Browse engine over the loaded poem collection.
//!
//! # Responsibility
//! - Aggregate tag counts for the tag bar.
//! - Filter and sort poems for the list view.
//! - Resolve selection targets and poet references for the detail view.
//!
//! # Invariants
//! - Every function here is pure over its inputs; state lives in
//!   `service::browse_service`.

pub mod filter;
pub mod selection;
pub mod tags;
