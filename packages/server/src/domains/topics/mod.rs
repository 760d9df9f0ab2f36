pub mod models;

pub use models::Topic;
