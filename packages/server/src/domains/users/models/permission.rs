use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{TagId, UserId};

/// Role a staff user holds on a tag.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PermissionRole {
    Answerer,
    Admin,
}

crate::text_enum!(PermissionRole {
    Answerer => "answerer",
    Admin => "admin",
});

/// Grants a staff user the right to answer posts carrying a tag.
/// Composite key (user_id, tag_id); no id of its own.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Permission {
    pub user_id: UserId,
    pub tag_id: TagId,
    pub role: PermissionRole,
    pub created_at: DateTime<Utc>,
}

impl Permission {
    /// Tags the user may answer under, in any role.
    pub async fn find_answerable_tag_ids(user_id: UserId, pool: &PgPool) -> sqlx::Result<Vec<TagId>> {
        sqlx::query_scalar::<_, TagId>(
            "SELECT tag_id FROM permissions WHERE user_id = $1 AND role IN ('answerer', 'admin') ORDER BY tag_id",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Grant (or change) a role. Permissions are administered elsewhere;
    /// used for seeding and tests.
    pub async fn grant(
        user_id: UserId,
        tag_id: TagId,
        role: PermissionRole,
        pool: &PgPool,
    ) -> sqlx::Result<Self> {
        sqlx::query_as::<_, Permission>(
            r#"
            INSERT INTO permissions (user_id, tag_id, role)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, tag_id) DO UPDATE SET role = EXCLUDED.role
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(tag_id)
        .bind(role)
        .fetch_one(pool)
        .await
    }
}
