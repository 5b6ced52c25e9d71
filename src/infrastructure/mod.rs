//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer, providing
//! concrete implementations for data persistence, caching and the upstream API.
//!
//! # Modules
//!
//! - [`cache`] - Cache store abstraction (Redis and in-memory implementations)
//! - [`persistence`] - PostgreSQL repository implementations
//! - [`upstream`] - HTTP client for the third-party REST service

pub mod cache;
pub mod persistence;
pub mod upstream;
