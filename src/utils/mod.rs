//! Helpers shared across layers.
//!
//! - [`url_normalizer`] - Destination URL validation and canonical form
//! - [`username`] - Public page slug rules
//! - [`token`] - API token generation and hashing

pub mod token;
pub mod url_normalizer;
pub mod username;
