//! Infrastructure layer: PostgreSQL stores and the Redis link cache.
//!
//! - [`persistence`] - Repository implementations over `sqlx::PgPool`
//! - [`cache`] - Link list cache for public pages (Redis or no-op)

pub mod cache;
pub mod persistence;
