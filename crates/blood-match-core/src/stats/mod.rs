//! Read-only projections over donor, request and history snapshots.

mod dashboard;
mod history;

pub use dashboard::*;
pub use history::*;
