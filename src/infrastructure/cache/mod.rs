//! Cache store for upstream snapshots and authenticated sessions.
//!
//! Provides a [`CacheService`] trait with two implementations:
//! - [`RedisCache`] - Redis-backed cache shared between instances
//! - [`MemoryCache`] - In-process cache used when Redis is not configured,
//!   unreachable at startup, or in tests

mod memory_cache;
mod redis_cache;
mod service;

pub use memory_cache::MemoryCache;
pub use redis_cache::RedisCache;
pub use service::{CacheError, CacheResult, CacheService, resource_key, session_key};
