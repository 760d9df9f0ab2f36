//! Posts domain activities - entry-point business logic
//!
//! Called from the HTTP routes. Activities take typed input, validate
//! references before writing, and return final models/results.

pub mod core;
pub mod tag_sync;
pub mod validation;

// Re-export for convenience
pub use core::*;
pub use tag_sync::TagSyncOutcome;
