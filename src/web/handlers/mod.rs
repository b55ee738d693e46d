//! HTML handlers for public creator pages.

mod profile;

pub use profile::{public_profile_handler, render_themed};
