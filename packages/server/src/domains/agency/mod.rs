pub mod models;

pub use models::Agency;
