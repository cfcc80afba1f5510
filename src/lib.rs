//! Library for `malla`, a curriculum progress tracker
//!
//! Load a course catalog, mark courses as completed, see which courses
//! are unlocked and highlight prerequisite relations.

pub mod config;
pub mod core;
pub mod logger;

/// Returns the current version of the `malla` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
