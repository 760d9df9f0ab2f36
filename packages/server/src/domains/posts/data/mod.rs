pub mod post;
pub mod types;

pub use post::{PostDetail, PostListing, PostOwner};
pub use types::*;
