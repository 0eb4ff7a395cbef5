//! Shared plumbing used by the server binary and the HTTP layer.

pub mod types;
pub mod utils;
