//! Utility modules.

pub mod date;
pub mod html;
pub mod mime;
pub mod plural;
