//! Rate limiting middleware using token bucket algorithm.
//!
//! Each tier comes in two flavours: keyed by the socket peer address, or by
//! `X-Forwarded-For` / `X-Real-IP` for deployments behind a trusted proxy.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{KeyExtractor, PeerIpKeyExtractor, SmartIpKeyExtractor},
};

type Layer<K> = GovernorLayer<K, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

fn build<K: KeyExtractor>(key_extractor: K, per_second: u64, burst_size: u32) -> Layer<K> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(key_extractor)
            .per_second(per_second)
            .burst_size(burst_size)
            .finish()
            .expect("rate limit period and burst are non-zero"),
    );

    GovernorLayer::new(governor_conf)
}

/// Creates a rate limiter for authenticated API endpoints.
///
/// # Limits
///
/// - **Rate**: 2 requests per second
/// - **Burst**: 100 requests
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/todos", get(list_todos_handler))
///     .layer(rate_limit::layer());
/// ```
pub fn layer() -> Layer<PeerIpKeyExtractor> {
    build(PeerIpKeyExtractor, 2, 100)
}

/// [`layer`] keyed by forwarded client IP headers.
pub fn forwarded_layer() -> Layer<SmartIpKeyExtractor> {
    build(SmartIpKeyExtractor, 2, 100)
}

/// Creates a stricter rate limiter for credential endpoints.
///
/// # Limits
///
/// - **Rate**: 1 request per second
/// - **Burst**: 10 requests
///
/// Used for registration and login.
pub fn secure_layer() -> Layer<PeerIpKeyExtractor> {
    build(PeerIpKeyExtractor, 1, 10)
}

/// [`secure_layer`] keyed by forwarded client IP headers.
pub fn forwarded_secure_layer() -> Layer<SmartIpKeyExtractor> {
    build(SmartIpKeyExtractor, 1, 10)
}
