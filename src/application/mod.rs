//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! validation, and business rules. Services consume repository traits and provide
//! a clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::profile_service::ProfileService`] - Public pages, subscription gate, owner profile
//! - [`services::link_service::LinkService`] - Link editing and reordering
//! - [`services::stats_service::StatsService`] - Click analytics
//! - [`services::auth_service::AuthService`] - API token authentication

pub mod services;
