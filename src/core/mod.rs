//! Core types - pure path and locale rules shared across the codebase.

pub mod locale;
pub mod route;
mod state;
pub mod url;

pub use locale::{localize, split_locale};
pub use state::{is_shutdown, register_server, setup_shutdown_handler};
