//! Domain model for the phonebook.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//!
//! # Invariants
//! - Every contact is identified by a stable `ContactId`.
//! - Deletion removes the contact outright; there are no tombstones.

pub mod contact;
