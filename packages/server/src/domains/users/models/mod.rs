pub mod permission;
pub mod user;

pub use permission::{Permission, PermissionRole};
pub use user::User;
