//! Typed ID definitions for the forum entities.

pub use super::id::Id;

// ============================================================================
// Entity marker types
// ============================================================================

/// Marker type for Agency entities.
pub struct Agency;

/// Marker type for User entities (public askers and agency staff).
pub struct User;

/// Marker type for Topic entities.
pub struct Topic;

/// Marker type for Tag entities.
pub struct Tag;

/// Marker type for Post entities (questions).
pub struct Post;

/// Marker type for Answer entities.
pub struct Answer;

// ============================================================================
// Type aliases - the primary API
// ============================================================================

pub type AgencyId = Id<Agency>;

pub type UserId = Id<User>;

pub type TopicId = Id<Topic>;

pub type TagId = Id<Tag>;

pub type PostId = Id<Post>;

pub type AnswerId = Id<Answer>;
