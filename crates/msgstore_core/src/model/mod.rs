//! Domain model for stored messages.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Define the injected time and identity collaborators.
//!
//! # Invariants
//! - Every stored message is identified by a store-assigned `MessageId`.
//! - Deletion is a hard delete; no tombstones are kept.

pub mod clock;
pub mod message;
