//! Domain types shared across Foodgram crates.
//!
//! This crate contains only pure types with no framework dependencies.

pub mod pagination;
pub mod user;
