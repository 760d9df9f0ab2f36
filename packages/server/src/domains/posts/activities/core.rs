//! Post operations - entry points called by the HTTP routes.
//!
//! Each operation validates its references first and only then touches the
//! store. Writes that span more than one row run in a single transaction.

use std::collections::HashMap;

use sqlx::PgPool;
use tracing::{info, instrument, warn};

use super::tag_sync::{sync_post_tags_tx, TagSyncOutcome};
use super::validation::{resolve_list_filter, validate_post_references};
use crate::common::{Page, PageWindow, PostId};
use crate::domains::agency::Agency;
use crate::domains::posts::data::{
    CreatePostInput, CreatedPost, ListAnswerablePosts, ListPostsFilter, PostDetail, PostListing,
    UpdatePostInput,
};
use crate::domains::posts::errors::{read_failed, write_failed, PostError};
use crate::domains::posts::models::{ListedPostFilter, NewPost, Post, PostChanges};
use crate::domains::tag::{Tag, TagSummary};
use crate::domains::topics::Topic;
use crate::domains::users::{Permission, User};
use crate::kernel::ServerDeps;

/// Visible posts of an agency, optionally narrowed by tag and topic names.
#[instrument(skip(deps), fields(agency_id = %filter.agency_id))]
pub async fn list_posts(
    filter: ListPostsFilter,
    deps: &ServerDeps,
) -> Result<Page<PostListing>, PostError> {
    let pool = &deps.db_pool;
    let window = filter.page.window()?;

    Agency::find_by_id(filter.agency_id, pool)
        .await
        .map_err(read_failed("load agency"))?
        .ok_or(PostError::MissingAgency)?;

    let resolved = resolve_list_filter(
        filter.tags.as_deref(),
        filter.topics.as_deref(),
        filter.agency_id,
        pool,
    )
    .await?;

    let listed = ListedPostFilter {
        agency_id: filter.agency_id,
        tag_ids: resolved.tag_ids.as_deref(),
        topic_ids: resolved.topic_ids.as_deref(),
        statuses: deps.post_settings.visibility.visible_statuses(),
    };

    // Count and page read one snapshot so the total always matches the page.
    let (limit, offset) = PageWindow::bind_values(window);
    let mut tx = pool.begin().await.map_err(read_failed("list posts"))?;
    sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
        .execute(&mut *tx)
        .await
        .map_err(read_failed("list posts"))?;
    let total_items = Post::count_listed_tx(&listed, &mut *tx)
        .await
        .map_err(read_failed("count posts"))?;
    let posts = Post::find_listed_tx(&listed, filter.sort, limit, offset, &mut *tx)
        .await
        .map_err(read_failed("list posts"))?;
    tx.commit().await.map_err(read_failed("list posts"))?;

    info!(total_items, returned = posts.len(), "Listed posts");

    Ok(Page::new(with_tags(posts, pool).await?, total_items))
}

/// Posts a staff user can answer: their agency's posts carrying a tag they
/// hold a permission on, split on whether an answer exists yet.
#[instrument(skip(deps), fields(user_id = %input.user_id))]
pub async fn list_answerable_posts(
    input: ListAnswerablePosts,
    deps: &ServerDeps,
) -> Result<Page<PostListing>, PostError> {
    let pool = &deps.db_pool;
    input.page.window()?;

    let user = User::find_by_id(input.user_id, pool)
        .await
        .map_err(read_failed("load user"))?
        .ok_or(PostError::MissingUser)?;

    let Some(agency_id) = user.agency_id else {
        return Ok(Page::new(Vec::new(), 0));
    };

    let tag_ids = Permission::find_answerable_tag_ids(user.id, pool)
        .await
        .map_err(read_failed("load permissions"))?;
    if tag_ids.is_empty() {
        return Ok(Page::new(Vec::new(), 0));
    }

    let candidates =
        Post::find_answerable(agency_id, &tag_ids, input.with_answers, input.sort, pool)
            .await
            .map_err(read_failed("list answerable posts"))?;
    let page = Page::from_items(candidates, &input.page)?;

    info!(
        total_items = page.total_items,
        returned = page.posts.len(),
        with_answers = input.with_answers,
        "Listed answerable posts"
    );

    Ok(Page::new(with_tags(page.posts, pool).await?, page.total_items))
}

#[instrument(skip(deps))]
pub async fn get_single_post(post_id: PostId, deps: &ServerDeps) -> Result<PostDetail, PostError> {
    let pool = &deps.db_pool;
    let statuses = deps.post_settings.visibility.visible_statuses();

    let post = Post::find_visible_by_id(post_id, statuses, pool)
        .await
        .map_err(read_failed("load post"))?
        .ok_or(PostError::MissingPublicPost)?;

    let tags = Tag::find_for_post(post.id, pool)
        .await
        .map_err(read_failed("load post tags"))?;
    let topic = match post.topic_id {
        Some(topic_id) => Topic::find_by_id(topic_id, pool)
            .await
            .map_err(read_failed("load topic"))?,
        None => None,
    };
    let user = User::find_by_id(post.user_id, pool)
        .await
        .map_err(read_failed("load post owner"))?
        .ok_or(PostError::MissingUser)?;
    let related_posts =
        Post::find_related(&post, statuses, deps.post_settings.related_posts_limit, pool)
            .await
            .map_err(read_failed("load related posts"))?;

    Ok(PostDetail {
        post,
        tags,
        topic,
        user: user.into(),
        related_posts,
    })
}

#[instrument(skip(deps), fields(agency_id = %input.agency_id, user_id = %input.user_id))]
pub async fn create_post(
    input: CreatePostInput,
    deps: &ServerDeps,
) -> Result<CreatedPost, PostError> {
    let pool = &deps.db_pool;

    User::find_by_id(input.user_id, pool)
        .await
        .map_err(read_failed("load user"))?
        .ok_or(PostError::MissingUser)?;
    Agency::find_by_id(input.agency_id, pool)
        .await
        .map_err(read_failed("load agency"))?
        .ok_or(PostError::MissingAgency)?;

    let tag_ids =
        validate_post_references(&input.tag_names, input.topic_id, input.agency_id, pool).await?;

    let new_post = NewPost {
        title: input.title,
        description: input.description,
        status: deps.post_settings.visibility.initial_status,
        user_id: input.user_id,
        agency_id: input.agency_id,
        topic_id: input.topic_id,
    };

    let mut tx = pool.begin().await.map_err(write_failed("create post"))?;
    let post = Post::insert_tx(new_post, &mut *tx)
        .await
        .map_err(write_failed("create post"))?;
    let outcome = sync_post_tags_tx(post.id, &tag_ids, &mut *tx)
        .await
        .map_err(write_failed("create post"))?;
    tx.commit().await.map_err(write_failed("create post"))?;

    info!(post_id = %post.id, tags_added = outcome.added, "Created post");

    Ok(CreatedPost { id: post.id })
}

/// Replace a post's title, description, topic and tag set. Archived posts
/// keep their status; only their content can change.
#[instrument(skip(deps), fields(post_id = %input.id))]
pub async fn update_post(
    input: UpdatePostInput,
    deps: &ServerDeps,
) -> Result<TagSyncOutcome, PostError> {
    let pool = &deps.db_pool;

    let post = Post::find_by_id(input.id, pool)
        .await
        .map_err(read_failed("load post for update"))?
        .ok_or(PostError::PostUpdateFailed)?;

    let status = match input.status {
        None => post.status,
        Some(next) if next == post.status => next,
        Some(next) => {
            let visibility = deps.post_settings.visibility;
            if next.is_archived()
                || !visibility.allow_visibility_change
                || !post.status.can_transition_to(next)
            {
                return Err(PostError::VisibilityChangeNotAllowed);
            }
            next
        }
    };

    let tag_ids =
        validate_post_references(&input.tag_names, input.topic_id, post.agency_id, pool).await?;

    let changes = PostChanges {
        title: input.title,
        description: input.description,
        topic_id: input.topic_id,
        status,
    };

    let mut tx = pool.begin().await.map_err(write_failed("update post"))?;
    let updated = Post::update_tx(post.id, changes, &mut *tx)
        .await
        .map_err(write_failed("update post"))?;
    if updated != 1 {
        // Row vanished between the read and the write; dropping `tx` rolls back.
        warn!(post_id = %post.id, "Post disappeared during update");
        return Err(PostError::PostUpdateFailed);
    }
    let outcome = sync_post_tags_tx(post.id, &tag_ids, &mut *tx)
        .await
        .map_err(write_failed("update post"))?;
    tx.commit().await.map_err(write_failed("update post"))?;

    info!(
        post_id = %post.id,
        tags_added = outcome.added,
        tags_removed = outcome.removed,
        "Updated post"
    );

    Ok(outcome)
}

/// Archive a post. Its row and tag associations are kept.
#[instrument(skip(deps))]
pub async fn delete_post(post_id: PostId, deps: &ServerDeps) -> Result<(), PostError> {
    let archived = Post::archive(post_id, &deps.db_pool)
        .await
        .map_err(write_failed("archive post"))?;

    if archived != 1 {
        return Err(PostError::PostUpdateFailed);
    }

    info!(post_id = %post_id, "Archived post");
    Ok(())
}

/// Attach tag summaries to a page of posts with one query.
async fn with_tags(posts: Vec<Post>, pool: &PgPool) -> Result<Vec<PostListing>, PostError> {
    if posts.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<PostId> = posts.iter().map(|p| p.id).collect();
    let mut tags_by_post: HashMap<PostId, Vec<TagSummary>> = HashMap::new();
    let rows = Tag::find_for_post_ids(&ids, pool)
        .await
        .map_err(read_failed("load listing tags"))?;
    for row in rows {
        tags_by_post.entry(row.post_id).or_default().push(row.tag);
    }

    Ok(posts
        .into_iter()
        .map(|post| PostListing {
            tags: tags_by_post.remove(&post.id).unwrap_or_default(),
            post,
        })
        .collect())
}
