pub mod post_tag;
pub mod tag;

pub use post_tag::PostTag;
pub use tag::{Tag, TagSummary, TagType, TagWithPostId};
