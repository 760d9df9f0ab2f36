use serde::{Deserialize, Serialize};

use crate::common::UserId;
use crate::domains::posts::models::Post;
use crate::domains::tag::TagSummary;
use crate::domains::topics::Topic;
use crate::domains::users::User;

/// A post as it appears in listings: the row plus its tags.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostListing {
    #[serde(flatten)]
    pub post: Post,
    pub tags: Vec<TagSummary>,
}

/// Public view of the user who asked the question.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostOwner {
    pub id: UserId,
    pub username: String,
    pub displayname: String,
}

impl From<User> for PostOwner {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            displayname: user.displayname,
        }
    }
}

/// Single post with everything the question page shows.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDetail {
    #[serde(flatten)]
    pub post: Post,
    pub tags: Vec<TagSummary>,
    pub topic: Option<Topic>,
    pub user: PostOwner,
    pub related_posts: Vec<Post>,
}
