//! Repository trait definitions for the domain layer.
//!
//! These traits describe the stores the services depend on. PostgreSQL
//! implementations live in `crate::infrastructure::persistence`; unit tests
//! use the `mockall` mocks generated under `cfg(test)`, and the HTTP tests in
//! `tests/` use in-memory implementations.
//!
//! # Available Repositories
//!
//! - [`LinkRepository`] - Owner-scoped link CRUD and reordering
//! - [`UserRepository`] - Accounts, page settings and billing state
//! - [`StatsRepository`] - Click recording and aggregation
//! - [`TokenRepository`] - API token authentication

pub mod link_repository;
pub mod stats_repository;
pub mod token_repository;
pub mod user_repository;

pub use link_repository::LinkRepository;
pub use stats_repository::{DailyClicks, LinkClickTotal, StatsFilter, StatsRepository};
pub use token_repository::{ApiToken, TokenRepository};
pub use user_repository::UserRepository;

#[cfg(test)]
pub use link_repository::MockLinkRepository;
#[cfg(test)]
pub use stats_repository::MockStatsRepository;
#[cfg(test)]
pub use token_repository::MockTokenRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
