use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};

use crate::common::{AgencyId, PostId, TagId, TopicId, UserId};

/// A question asked to an agency.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub description: Option<String>,
    pub status: PostStatus,

    // Ownership and routing
    pub user_id: UserId,
    pub agency_id: AgencyId,
    pub topic_id: Option<TopicId>,

    // Popularity key for the "top" sort
    pub views: i32,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Enums
// =============================================================================

/// Post status. `Archived` is terminal (soft delete).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PostStatus {
    Public,
    Private,
    Archived,
}

crate::text_enum!(PostStatus {
    Public => "public",
    Private => "private",
    Archived => "archived",
});

impl PostStatus {
    pub fn is_archived(&self) -> bool {
        matches!(self, PostStatus::Archived)
    }

    /// Public ↔ Private and anything → Archived. Nothing leaves Archived.
    pub fn can_transition_to(&self, next: PostStatus) -> bool {
        match (self, next) {
            (PostStatus::Archived, _) => false,
            (_, PostStatus::Archived) => true,
            (from, to) => *from == to || matches!(
                (from, to),
                (PostStatus::Public, PostStatus::Private) | (PostStatus::Private, PostStatus::Public)
            ),
        }
    }
}

/// Listing order. Every strategy breaks ties by ascending id, i.e. creation order.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortType {
    /// Most recently active first.
    Basic,
    /// Most viewed first.
    #[default]
    Top,
}

crate::text_enum!(SortType {
    Basic => "basic",
    Top => "top",
});

impl SortType {
    /// ORDER BY clause over the `p` alias of `posts`.
    pub fn order_by(&self) -> &'static str {
        match self {
            SortType::Basic => "p.updated_at DESC, p.id ASC",
            SortType::Top => "p.views DESC, p.id ASC",
        }
    }
}

// =============================================================================
// Query inputs
// =============================================================================

/// Filter for public listings. `None` tag/topic sets mean "no filter".
#[derive(Debug, Clone, Copy)]
pub struct ListedPostFilter<'a> {
    pub agency_id: AgencyId,
    pub tag_ids: Option<&'a [TagId]>,
    pub topic_ids: Option<&'a [TopicId]>,
    pub statuses: &'a [PostStatus],
}

/// Row values for a new post.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub description: Option<String>,
    pub status: PostStatus,
    pub user_id: UserId,
    pub agency_id: AgencyId,
    pub topic_id: Option<TopicId>,
}

/// Replacement values for an existing post.
#[derive(Debug, Clone)]
pub struct PostChanges {
    pub title: String,
    pub description: Option<String>,
    pub topic_id: Option<TopicId>,
    pub status: PostStatus,
}

const LISTED_WHERE: &str = r#"
    WHERE p.agency_id = $1
      AND p.status = ANY($2)
      AND ($3::uuid[] IS NULL OR EXISTS (
            SELECT 1 FROM post_tags pt WHERE pt.post_id = p.id AND pt.tag_id = ANY($3)
          ))
      AND ($4::uuid[] IS NULL OR p.topic_id = ANY($4))
"#;

// =============================================================================
// Queries
// =============================================================================

impl Post {
    pub async fn find_by_id(id: PostId, pool: &PgPool) -> sqlx::Result<Option<Self>> {
        sqlx::query_as::<_, Post>("SELECT * FROM posts WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Post with `id` whose status is one of `statuses`.
    pub async fn find_visible_by_id(
        id: PostId,
        statuses: &[PostStatus],
        pool: &PgPool,
    ) -> sqlx::Result<Option<Self>> {
        sqlx::query_as::<_, Post>("SELECT * FROM posts WHERE id = $1 AND status = ANY($2)")
            .bind(id)
            .bind(statuses)
            .fetch_optional(pool)
            .await
    }

    /// Size of the whole listing. Run it in the same snapshot as
    /// [`Post::find_listed_tx`] so the total matches the page.
    pub async fn count_listed_tx(
        filter: &ListedPostFilter<'_>,
        conn: &mut PgConnection,
    ) -> sqlx::Result<i64> {
        let sql = format!("SELECT COUNT(*) FROM posts p {LISTED_WHERE}");
        sqlx::query_scalar::<_, i64>(&sql)
            .bind(filter.agency_id)
            .bind(filter.statuses)
            .bind(filter.tag_ids)
            .bind(filter.topic_ids)
            .fetch_one(&mut *conn)
            .await
    }

    /// One window of the listing. `limit = None` returns every row from `offset`.
    pub async fn find_listed_tx(
        filter: &ListedPostFilter<'_>,
        sort: SortType,
        limit: Option<i64>,
        offset: i64,
        conn: &mut PgConnection,
    ) -> sqlx::Result<Vec<Self>> {
        let sql = format!(
            "SELECT p.* FROM posts p {LISTED_WHERE} ORDER BY {} LIMIT $5 OFFSET $6",
            sort.order_by()
        );
        sqlx::query_as::<_, Post>(&sql)
            .bind(filter.agency_id)
            .bind(filter.statuses)
            .bind(filter.tag_ids)
            .bind(filter.topic_ids)
            .bind(limit)
            .bind(offset)
            .fetch_all(&mut *conn)
            .await
    }

    /// Non-archived posts of an agency carrying any of `tag_ids`, split on
    /// whether they already have an answer.
    pub async fn find_answerable(
        agency_id: AgencyId,
        tag_ids: &[TagId],
        with_answers: bool,
        sort: SortType,
        pool: &PgPool,
    ) -> sqlx::Result<Vec<Self>> {
        let sql = format!(
            r#"
            SELECT p.* FROM posts p
            WHERE p.agency_id = $1
              AND p.status <> 'archived'
              AND EXISTS (
                    SELECT 1 FROM post_tags pt WHERE pt.post_id = p.id AND pt.tag_id = ANY($2)
                  )
              AND EXISTS (SELECT 1 FROM answers a WHERE a.post_id = p.id) = $3
            ORDER BY {}
            "#,
            sort.order_by()
        );
        sqlx::query_as::<_, Post>(&sql)
            .bind(agency_id)
            .bind(tag_ids)
            .bind(with_answers)
            .fetch_all(pool)
            .await
    }

    /// Visible posts of the same agency sharing this post's topic, or sharing
    /// one of its tags when it has no topic. Most viewed first.
    pub async fn find_related(
        post: &Post,
        statuses: &[PostStatus],
        limit: i64,
        pool: &PgPool,
    ) -> sqlx::Result<Vec<Self>> {
        sqlx::query_as::<_, Post>(
            r#"
            SELECT p.* FROM posts p
            WHERE p.id <> $1
              AND p.agency_id = $2
              AND p.status = ANY($3)
              AND CASE
                    WHEN $4::uuid IS NOT NULL THEN p.topic_id = $4
                    ELSE EXISTS (
                        SELECT 1 FROM post_tags pt
                        WHERE pt.post_id = p.id
                          AND pt.tag_id IN (SELECT tag_id FROM post_tags WHERE post_id = $1)
                    )
                  END
            ORDER BY p.views DESC, p.id ASC
            LIMIT $5
            "#,
        )
        .bind(post.id)
        .bind(post.agency_id)
        .bind(statuses)
        .bind(post.topic_id)
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    pub async fn insert_tx(new_post: NewPost, conn: &mut PgConnection) -> sqlx::Result<Self> {
        sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (id, title, description, status, user_id, agency_id, topic_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(PostId::new())
        .bind(new_post.title)
        .bind(new_post.description)
        .bind(new_post.status)
        .bind(new_post.user_id)
        .bind(new_post.agency_id)
        .bind(new_post.topic_id)
        .fetch_one(&mut *conn)
        .await
    }

    /// Replace the editable fields of a post. Returns rows affected.
    /// The row lock taken here is held until the transaction ends.
    pub async fn update_tx(
        id: PostId,
        changes: PostChanges,
        conn: &mut PgConnection,
    ) -> sqlx::Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE posts
            SET title = $2, description = $3, topic_id = $4, status = $5, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(changes.title)
        .bind(changes.description)
        .bind(changes.topic_id)
        .bind(changes.status)
        .execute(&mut *conn)
        .await?;
        Ok(result.rows_affected())
    }

    /// Soft delete. Returns rows affected.
    pub async fn archive(id: PostId, pool: &PgPool) -> sqlx::Result<u64> {
        let result = sqlx::query(
            "UPDATE posts SET status = 'archived', updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
