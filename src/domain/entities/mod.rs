//! Core domain entities.
//!
//! # Entity Types
//!
//! - [`Link`] - An outbound link on a creator's page
//! - [`User`] - The creator account owning a page
//! - [`Click`] - A visit recorded through the click redirect
//! - [`Theme`] - Closed set of page themes
//!
//! Creation and update inputs live next to their entity
//! (`NewLink`, `LinkPatch`, `NewUser`, `ProfilePatch`, `NewClick`).

pub mod click;
pub mod icon;
pub mod link;
pub mod theme;
pub mod user;

pub use click::{Click, NewClick};
pub use icon::{LINK_ICONS, is_known_icon};
pub use link::{Link, LinkPatch, NewLink};
pub use theme::Theme;
pub use user::{NewUser, ProfilePatch, SubscriptionStatus, User};
