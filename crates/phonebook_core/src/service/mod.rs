//! Core use-case services.
//!
//! # Responsibility
//! - Own mutable phonebook state and orchestrate persistence around it.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod contact_book;
