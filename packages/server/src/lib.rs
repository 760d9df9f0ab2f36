// Forum API Core
//
// This crate provides the backend API for the public question forum where
// residents ask agencies questions and agency staff answer them.
// Architecture follows domain-driven design: models own their queries,
// activities hold the business logic, and the server layer maps HTTP onto them.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
