//! Derived read-only projections over the contact list.

pub mod filter;
