//! Test fixtures for creating test data.
//!
//! These fixtures use the model methods directly to create test data. Names
//! carry a random suffix so tests sharing the database never collide.

use anyhow::{Context, Result};
use forum_core::common::{AgencyId, AnswerId, PostId, UserId};
use forum_core::domains::agency::Agency;
use forum_core::domains::posts::activities::create_post;
use forum_core::domains::posts::CreatePostInput;
use forum_core::domains::tag::{Tag, TagType};
use forum_core::domains::topics::Topic;
use forum_core::domains::users::{Permission, PermissionRole, User};
use forum_core::kernel::ServerDeps;
use sqlx::PgPool;
use uuid::Uuid;

fn unique(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4().simple())
}

/// One agency with an asker, a staff member, a topic and a tag.
pub struct Forum {
    pub agency: Agency,
    pub asker: User,
    pub staff: User,
    pub topic: Topic,
    pub tag: Tag,
}

impl Forum {
    pub async fn create(pool: &PgPool) -> Result<Self> {
        let agency = create_agency(pool).await?;
        let asker = create_user(pool, None).await?;
        let staff = create_user(pool, Some(agency.id)).await?;
        let topic = create_topic(pool, agency.id, "Housing").await?;
        let tag = create_tag(pool, "housing").await?;
        Ok(Self {
            agency,
            asker,
            staff,
            topic,
            tag,
        })
    }

    /// Create `count` posts in this agency under the forum topic and tag,
    /// titled "Question 1".."Question N", in creation order.
    pub async fn seed_posts(&self, count: usize, deps: &ServerDeps) -> Result<Vec<PostId>> {
        let mut ids = Vec::with_capacity(count);
        for n in 1..=count {
            let input = CreatePostInput::builder()
                .title(format!("Question {}", n))
                .description(Some("How do I apply?".to_string()))
                .user_id(self.asker.id)
                .agency_id(self.agency.id)
                .tag_names(vec![self.tag.name.clone()])
                .topic_id(Some(self.topic.id))
                .build();
            let created = create_post(input, deps)
                .await
                .with_context(|| format!("Failed to seed post {}", n))?;
            ids.push(created.id);
        }
        Ok(ids)
    }
}

pub async fn create_agency(pool: &PgPool) -> Result<Agency> {
    let shortname = unique("agency");
    let agency = Agency::create(
        &shortname,
        "Department of Questions",
        "questions@example.org",
        "logo.png",
        pool,
    )
    .await?;
    Ok(agency)
}

pub async fn create_user(pool: &PgPool, agency_id: Option<AgencyId>) -> Result<User> {
    let username = unique("user");
    Ok(User::create(&username, "Test User", agency_id, pool).await?)
}

pub async fn create_topic(pool: &PgPool, agency_id: AgencyId, name: &str) -> Result<Topic> {
    Ok(Topic::create(name, "Test topic", agency_id, None, pool).await?)
}

pub async fn create_tag(pool: &PgPool, prefix: &str) -> Result<Tag> {
    let name = unique(prefix);
    Ok(Tag::create(&name, "Test tag", TagType::Topic, false, pool).await?)
}

pub async fn grant_answerer(pool: &PgPool, user_id: UserId, tag: &Tag) -> Result<()> {
    Permission::grant(user_id, tag.id, PermissionRole::Answerer, pool).await?;
    Ok(())
}

/// Answers are written by another part of the system; insert one directly.
pub async fn add_answer(pool: &PgPool, post_id: PostId, user_id: UserId) -> Result<()> {
    sqlx::query("INSERT INTO answers (id, body, user_id, post_id) VALUES ($1, $2, $3, $4)")
        .bind(AnswerId::new())
        .bind("Here is how.")
        .bind(user_id)
        .bind(post_id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn set_views(pool: &PgPool, post_id: PostId, views: i32) -> Result<()> {
    sqlx::query("UPDATE posts SET views = $2 WHERE id = $1")
        .bind(post_id)
        .bind(views)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn count_post_tags(pool: &PgPool, post_id: PostId) -> Result<i64> {
    Ok(
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM post_tags WHERE post_id = $1")
            .bind(post_id)
            .fetch_one(pool)
            .await?,
    )
}

pub async fn count_posts_in_agency(pool: &PgPool, agency_id: AgencyId) -> Result<i64> {
    Ok(
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM posts WHERE agency_id = $1")
            .bind(agency_id)
            .fetch_one(pool)
            .await?,
    )
}
