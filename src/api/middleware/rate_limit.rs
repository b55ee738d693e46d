//! Per-IP rate limiting using the token bucket algorithm.
//!
//! Requests exceeding a limit receive `429 Too Many Requests`. Keys are the
//! socket peer address, so the server must be started with
//! `into_make_service_with_connect_info`.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::PeerIpKeyExtractor,
};

pub type IpRateLimitLayer =
    GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Limiter for public pages and click redirects.
///
/// - **Rate**: 2 requests per second
/// - **Burst**: 100 requests
///
/// The burst is sized for a visitor opening a page and following a few links.
pub fn public_layer() -> IpRateLimitLayer {
    per_ip(2, 100)
}

/// Limiter for the owner API.
///
/// - **Rate**: 1 request per second
/// - **Burst**: 20 requests
pub fn owner_layer() -> IpRateLimitLayer {
    per_ip(1, 20)
}

fn per_ip(per_second: u64, burst_size: u32) -> IpRateLimitLayer {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(per_second)
            .burst_size(burst_size)
            .finish()
            .unwrap(),
    );

    GovernorLayer::new(governor_conf)
}
