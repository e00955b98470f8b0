//! Core domain types for the tasklist CLI.

pub mod config;
pub mod store;
pub mod task;

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
