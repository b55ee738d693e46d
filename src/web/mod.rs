//! Server-rendered public pages.
//!
//! Pages are rendered with askama templates from `templates/`, one template
//! per [`crate::domain::entities::Theme`].

pub mod handlers;
pub mod routes;
pub mod views;
