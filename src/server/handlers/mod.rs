//! Check server HTTP handlers.

mod check;
mod status;

pub use check::{check_get_handler, check_post_handler};
pub use status::status_handler;
