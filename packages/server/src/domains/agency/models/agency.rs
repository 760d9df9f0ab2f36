use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::AgencyId;

/// Government agency that questions are routed to.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Agency {
    pub id: AgencyId,
    pub shortname: String, // URL-safe, e.g. 'was'
    pub longname: String,
    pub email: String,
    pub logo: String,
    pub display_order: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Agency {
    pub async fn find_by_id(id: AgencyId, pool: &PgPool) -> sqlx::Result<Option<Self>> {
        sqlx::query_as::<_, Agency>("SELECT * FROM agencies WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Agencies are managed outside this service; used for seeding and tests.
    pub async fn create(
        shortname: &str,
        longname: &str,
        email: &str,
        logo: &str,
        pool: &PgPool,
    ) -> sqlx::Result<Self> {
        sqlx::query_as::<_, Agency>(
            r#"
            INSERT INTO agencies (id, shortname, longname, email, logo)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(AgencyId::new())
        .bind(shortname)
        .bind(longname)
        .bind(email)
        .bind(logo)
        .fetch_one(pool)
        .await
    }
}
