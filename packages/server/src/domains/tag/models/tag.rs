use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{PostId, TagId};

/// Category label used for filtering posts and for granting answer rights.
/// Reference data: this service reads tags but never creates them on behalf of a post.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: TagId,
    pub name: String, // unique, e.g. 'employment', 'cpf'
    pub description: String,
    pub link: String,
    pub tag_type: TagType,
    pub has_pilot: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TagType {
    Topic,
    Agency,
    Other,
}

crate::text_enum!(TagType {
    Topic => "topic",
    Agency => "agency",
    Other => "other",
});

/// What listings and post details show for a tag.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TagSummary {
    pub id: TagId,
    pub name: String,
    pub tag_type: TagType,
}

/// Helper struct for batch-loading tags with their associated post ID.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TagWithPostId {
    pub post_id: PostId,
    #[sqlx(flatten)]
    pub tag: TagSummary,
}

// =============================================================================
// Tag Queries
// =============================================================================

impl Tag {
    /// Tags whose name is in `names`. Names that match nothing are simply absent.
    pub async fn find_by_names(names: &[String], pool: &PgPool) -> sqlx::Result<Vec<Self>> {
        sqlx::query_as::<_, Tag>("SELECT * FROM tags WHERE name = ANY($1) ORDER BY name")
            .bind(names)
            .fetch_all(pool)
            .await
    }

    /// Tags attached to one post
    pub async fn find_for_post(post_id: PostId, pool: &PgPool) -> sqlx::Result<Vec<TagSummary>> {
        sqlx::query_as::<_, TagSummary>(
            r#"
            SELECT t.id, t.name, t.tag_type
            FROM tags t
            INNER JOIN post_tags pt ON pt.tag_id = t.id
            WHERE pt.post_id = $1
            ORDER BY t.name
            "#,
        )
        .bind(post_id)
        .fetch_all(pool)
        .await
    }

    /// Batch-load tags for a page of posts.
    /// Returns (post_id, tag) pairs; the caller groups them.
    pub async fn find_for_post_ids(
        post_ids: &[PostId],
        pool: &PgPool,
    ) -> sqlx::Result<Vec<TagWithPostId>> {
        sqlx::query_as::<_, TagWithPostId>(
            r#"
            SELECT pt.post_id, t.id, t.name, t.tag_type
            FROM tags t
            INNER JOIN post_tags pt ON pt.tag_id = t.id
            WHERE pt.post_id = ANY($1)
            ORDER BY t.name
            "#,
        )
        .bind(post_ids)
        .fetch_all(pool)
        .await
    }

    /// Tags are managed elsewhere; used for seeding and tests.
    pub async fn create(
        name: &str,
        description: &str,
        tag_type: TagType,
        has_pilot: bool,
        pool: &PgPool,
    ) -> sqlx::Result<Self> {
        sqlx::query_as::<_, Tag>(
            r#"
            INSERT INTO tags (id, name, description, tag_type, has_pilot)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(TagId::new())
        .bind(name)
        .bind(description)
        .bind(tag_type)
        .bind(has_pilot)
        .fetch_one(pool)
        .await
    }
}
