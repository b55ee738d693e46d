//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod health;
pub mod links;
pub mod profile;
pub mod redirect;
pub mod stats;
pub mod usernames;

pub use health::health_handler;
pub use links::{
    create_link_handler, delete_link_handler, list_links_handler, reorder_links_handler,
    update_link_handler,
};
pub use profile::{get_profile_handler, update_profile_handler};
pub use redirect::click_redirect_handler;
pub use stats::stats_handler;
pub use usernames::username_availability_handler;
