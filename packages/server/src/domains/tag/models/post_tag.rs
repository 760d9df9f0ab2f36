use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgConnection;

use crate::common::{PostId, TagId};

/// Post ↔ tag association, keyed by the pair.
///
/// Rows are written only by the tag sync activity, always on a connection
/// borrowed from an open transaction.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PostTag {
    pub post_id: PostId,
    pub tag_id: TagId,
    pub created_at: DateTime<Utc>,
}

impl PostTag {
    /// Current tag ids of a post, read inside the caller's transaction.
    /// Callers hold the post row lock, which serializes re-syncs of one post.
    pub async fn tag_ids_for_post_tx(
        post_id: PostId,
        conn: &mut PgConnection,
    ) -> sqlx::Result<Vec<TagId>> {
        sqlx::query_scalar::<_, TagId>(
            "SELECT tag_id FROM post_tags WHERE post_id = $1 ORDER BY tag_id",
        )
        .bind(post_id)
        .fetch_all(&mut *conn)
        .await
    }

    pub async fn insert_many_tx(
        post_id: PostId,
        tag_ids: &[TagId],
        conn: &mut PgConnection,
    ) -> sqlx::Result<u64> {
        let result = sqlx::query(
            r#"
            INSERT INTO post_tags (post_id, tag_id)
            SELECT $1, tag_id FROM UNNEST($2::uuid[]) AS t(tag_id)
            "#,
        )
        .bind(post_id)
        .bind(tag_ids)
        .execute(&mut *conn)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete_many_tx(
        post_id: PostId,
        tag_ids: &[TagId],
        conn: &mut PgConnection,
    ) -> sqlx::Result<u64> {
        let result = sqlx::query("DELETE FROM post_tags WHERE post_id = $1 AND tag_id = ANY($2)")
            .bind(post_id)
            .bind(tag_ids)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected())
    }
}
