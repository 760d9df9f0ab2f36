//! REST handlers for posts. Parsing and status codes only; the work happens in
//! the posts activities.

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::common::{AgencyId, Page, PageRequest, PostId, TopicId, UserId};
use crate::domains::posts::activities;
use crate::domains::posts::{
    CreatePostInput, CreatedPost, ListAnswerablePosts, ListPostsFilter, PostDetail, PostError,
    PostListing, PostStatus, SortType, UpdatePostInput,
};
use crate::server::app::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPostsParams {
    pub agency_id: AgencyId,
    /// Comma separated tag names
    pub tags: Option<String>,
    /// Comma separated topic names
    pub topics: Option<String>,
    pub sort: Option<SortType>,
    pub page: Option<u32>,
    pub size: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerableParams {
    pub user_id: UserId,
    pub sort: Option<SortType>,
    pub with_answers: Option<bool>,
    pub page: Option<u32>,
    pub size: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostBody {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tag_names: Vec<String>,
    #[serde(default)]
    pub topic_id: Option<TopicId>,
    #[serde(default)]
    pub status: Option<PostStatus>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// `None` and a blank parameter both mean "no filter".
fn split_names(raw: Option<String>) -> Option<Vec<String>> {
    let names: Vec<String> = raw?
        .split(',')
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect();
    (!names.is_empty()).then_some(names)
}

fn page_request(page: Option<u32>, size: Option<u32>) -> PageRequest {
    PageRequest { page, size }
}

pub async fn list_posts(
    Extension(state): Extension<AppState>,
    Query(params): Query<ListPostsParams>,
) -> Result<Json<Page<PostListing>>, PostError> {
    let filter = ListPostsFilter::builder()
        .agency_id(params.agency_id)
        .tags(split_names(params.tags))
        .topics(split_names(params.topics))
        .sort(params.sort.unwrap_or_default())
        .page(page_request(params.page, params.size))
        .build();

    let page = activities::list_posts(filter, &state.server_deps).await?;
    Ok(Json(page))
}

pub async fn list_answerable_posts(
    Extension(state): Extension<AppState>,
    Query(params): Query<AnswerableParams>,
) -> Result<Json<Page<PostListing>>, PostError> {
    let input = ListAnswerablePosts::builder()
        .user_id(params.user_id)
        .sort(params.sort.unwrap_or_default())
        .with_answers(params.with_answers.unwrap_or(false))
        .page(page_request(params.page, params.size))
        .build();

    let page = activities::list_answerable_posts(input, &state.server_deps).await?;
    Ok(Json(page))
}

pub async fn get_single_post(
    Extension(state): Extension<AppState>,
    Path(id): Path<PostId>,
) -> Result<Json<PostDetail>, PostError> {
    let post = activities::get_single_post(id, &state.server_deps).await?;
    Ok(Json(post))
}

pub async fn create_post(
    Extension(state): Extension<AppState>,
    Json(input): Json<CreatePostInput>,
) -> Result<(StatusCode, Json<CreatedPost>), PostError> {
    let created = activities::create_post(input, &state.server_deps).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_post(
    Extension(state): Extension<AppState>,
    Path(id): Path<PostId>,
    Json(body): Json<UpdatePostBody>,
) -> Result<Json<SuccessResponse>, PostError> {
    let input = UpdatePostInput::builder()
        .id(id)
        .title(body.title)
        .description(body.description)
        .tag_names(body.tag_names)
        .topic_id(body.topic_id)
        .status(body.status)
        .build();

    activities::update_post(input, &state.server_deps).await?;
    Ok(Json(SuccessResponse { success: true }))
}

pub async fn delete_post(
    Extension(state): Extension<AppState>,
    Path(id): Path<PostId>,
) -> Result<Json<SuccessResponse>, PostError> {
    activities::delete_post(id, &state.server_deps).await?;
    Ok(Json(SuccessResponse { success: true }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_name_lists_mean_no_filter() {
        assert_eq!(split_names(None), None);
        assert_eq!(split_names(Some(String::new())), None);
        assert_eq!(split_names(Some(" , ".to_string())), None);
    }

    #[test]
    fn names_are_split_on_commas() {
        assert_eq!(
            split_names(Some("housing, transport".to_string())),
            Some(vec!["housing".to_string(), "transport".to_string()])
        );
    }
}
