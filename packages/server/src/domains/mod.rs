// Business domains
pub mod agency;
pub mod posts;
pub mod tag;
pub mod topics;
pub mod users;
