//! Domain layer containing business entities and logic.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`sync`] - Fetch-and-reconcile of upstream collections into the local store
//!
//! # Design Principles
//!
//! - Repository traits define contracts implemented by the infrastructure layer
//! - Business logic is encapsulated in services (see [`crate::application::services`])
//! - Upstream records and local-insertable records are distinct types, so an
//!   upstream id never reaches the local store

pub mod entities;
pub mod repositories;
pub mod sync;
