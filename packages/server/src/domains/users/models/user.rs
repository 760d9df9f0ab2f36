use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{AgencyId, UserId};

/// Forum user. `agency_id` is set for agency staff and empty for public askers.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub displayname: String,
    pub agency_id: Option<AgencyId>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub async fn find_by_id(id: UserId, pool: &PgPool) -> sqlx::Result<Option<Self>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Users are provisioned by the auth layer; used for seeding and tests.
    pub async fn create(
        username: &str,
        displayname: &str,
        agency_id: Option<AgencyId>,
        pool: &PgPool,
    ) -> sqlx::Result<Self> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, username, displayname, agency_id)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(UserId::new())
        .bind(username)
        .bind(displayname)
        .bind(agency_id)
        .fetch_one(pool)
        .await
    }
}
