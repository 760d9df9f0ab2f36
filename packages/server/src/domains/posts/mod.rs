pub mod activities;
pub mod data;
pub mod errors;
pub mod models;
pub mod policy;

// Re-export data types
pub use data::{
    CreatePostInput, CreatedPost, ListAnswerablePosts, ListPostsFilter, PostDetail, PostListing,
    PostOwner, UpdatePostInput,
};

pub use errors::PostError;

// Re-export models (domain models)
pub use models::post::{Post, PostStatus, SortType};
pub use policy::{PostSettings, VisibilityPolicy};
