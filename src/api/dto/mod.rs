//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization and validator
//! for input validation. Required request fields are `Option`s marked
//! `required` so a missing field is reported like any other invalid field.

pub mod album;
pub mod health;
pub mod pagination;
pub mod photo;
pub mod response;
pub mod todo;
pub mod user;
