// HTTP routes
pub mod health;
pub mod posts;

pub use health::*;
