use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{AgencyId, TopicId};

/// Agency-scoped grouping of posts. Topics form a tree per agency via `parent_id`.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub id: TopicId,
    pub name: String,
    pub description: String,
    pub agency_id: AgencyId,
    pub parent_id: Option<TopicId>,
    pub created_at: DateTime<Utc>,
}

impl Topic {
    pub async fn find_by_id(id: TopicId, pool: &PgPool) -> sqlx::Result<Option<Self>> {
        sqlx::query_as::<_, Topic>("SELECT * FROM topics WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Topics of `agency_id` whose name is in `names`. A name may match more
    /// than one topic when it repeats at different depths of the tree.
    pub async fn find_by_names_in_agency(
        names: &[String],
        agency_id: AgencyId,
        pool: &PgPool,
    ) -> sqlx::Result<Vec<Self>> {
        sqlx::query_as::<_, Topic>(
            "SELECT * FROM topics WHERE agency_id = $1 AND name = ANY($2) ORDER BY id",
        )
        .bind(agency_id)
        .bind(names)
        .fetch_all(pool)
        .await
    }

    pub async fn exists_in_agency(
        id: TopicId,
        agency_id: AgencyId,
        pool: &PgPool,
    ) -> sqlx::Result<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM topics WHERE id = $1 AND agency_id = $2)",
        )
        .bind(id)
        .bind(agency_id)
        .fetch_one(pool)
        .await
    }

    /// Topics are managed elsewhere; used for seeding and tests.
    pub async fn create(
        name: &str,
        description: &str,
        agency_id: AgencyId,
        parent_id: Option<TopicId>,
        pool: &PgPool,
    ) -> sqlx::Result<Self> {
        sqlx::query_as::<_, Topic>(
            r#"
            INSERT INTO topics (id, name, description, agency_id, parent_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(TopicId::new())
        .bind(name)
        .bind(description)
        .bind(agency_id)
        .bind(parent_id)
        .fetch_one(pool)
        .await
    }
}
