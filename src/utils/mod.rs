//! Helpers shared across layers.
//!
//! - [`jwt`] - HS256 token signing and verification
//! - [`password`] - Argon2id password hashing

pub mod jwt;
pub mod password;
