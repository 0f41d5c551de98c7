//! Shared plumbing for the album store crates: tracing setup and
//! response types that are not tied to the album domain.

pub mod types;
pub mod utils;
