//! Domain layer: entities, store contracts and the pure page rules.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`visibility`] - Which links a public page shows, and in what order
//! - [`subscription`] - Whether a public page may be served at all
//! - [`click_event`] - Click tracking event model
//! - [`click_worker`] - Asynchronous click persistence
//!
//! The domain layer has no dependency on the HTTP or persistence layers.
//! [`visibility`] and [`subscription`] take `now` as an argument and perform
//! no I/O, so callers decide which clock they run against.
//!
//! # Public Page Flow
//!
//! 1. Load the user by username and their links from the stores
//! 2. [`subscription::evaluate_access`] decides whether the page is served
//! 3. [`visibility::visible_links`] filters and orders the links
//! 4. The web layer renders the result with the user's theme

pub mod click_event;
pub mod click_worker;
pub mod entities;
pub mod repositories;
pub mod subscription;
pub mod visibility;
