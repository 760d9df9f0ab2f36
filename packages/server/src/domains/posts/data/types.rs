use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::common::{AgencyId, PageRequest, PostId, TopicId, UserId};
use crate::domains::posts::models::{PostStatus, SortType};

// =============================================================================
// Inputs
// =============================================================================

/// Public listing filter. Absent or empty `tags`/`topics` mean "no filter".
#[derive(Debug, Clone, TypedBuilder)]
pub struct ListPostsFilter {
    pub agency_id: AgencyId,
    #[builder(default)]
    pub tags: Option<Vec<String>>,
    #[builder(default)]
    pub topics: Option<Vec<String>>,
    #[builder(default)]
    pub sort: SortType,
    #[builder(default)]
    pub page: PageRequest,
}

/// Posts a staff user may answer.
#[derive(Debug, Clone, TypedBuilder)]
pub struct ListAnswerablePosts {
    pub user_id: UserId,
    #[builder(default)]
    pub sort: SortType,
    #[builder(default)]
    pub with_answers: bool,
    #[builder(default)]
    pub page: PageRequest,
}

#[derive(Debug, Clone, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostInput {
    #[builder(setter(into))]
    pub title: String,
    #[builder(default, setter(into))]
    pub description: Option<String>,
    pub user_id: UserId,
    pub agency_id: AgencyId,
    #[serde(default)]
    #[builder(default)]
    pub tag_names: Vec<String>,
    #[serde(default)]
    #[builder(default)]
    pub topic_id: Option<TopicId>,
}

/// Full replacement of a post's editable fields. `topic_id: None` clears the
/// topic; `tag_names` becomes the complete tag set.
#[derive(Debug, Clone, TypedBuilder)]
pub struct UpdatePostInput {
    pub id: PostId,
    #[builder(setter(into))]
    pub title: String,
    #[builder(default, setter(into))]
    pub description: Option<String>,
    #[builder(default)]
    pub tag_names: Vec<String>,
    #[builder(default)]
    pub topic_id: Option<TopicId>,
    /// Visibility change, honoured only when the policy allows it.
    #[builder(default)]
    pub status: Option<PostStatus>,
}

// =============================================================================
// Outputs
// =============================================================================

/// Id of a newly created post.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CreatedPost {
    pub id: PostId,
}
