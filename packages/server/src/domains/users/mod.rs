pub mod models;

pub use models::{Permission, PermissionRole, User};
