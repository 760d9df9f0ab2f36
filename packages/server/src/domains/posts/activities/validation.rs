//! Tag and topic reference checks that run before any post query or write.
//!
//! Both categories are always resolved before an error is chosen, so a request
//! with bad tags and bad topics gets the single combined error.

use std::collections::HashSet;

use sqlx::PgPool;

use crate::common::{AgencyId, TagId, TopicId};
use crate::domains::posts::errors::{read_failed, PostError};
use crate::domains::tag::Tag;
use crate::domains::topics::Topic;

/// Which reference categories failed to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnresolvedReferences {
    Tags,
    Topics,
    TagsAndTopics,
}

impl UnresolvedReferences {
    pub fn classify(tags_ok: bool, topics_ok: bool) -> Option<Self> {
        match (tags_ok, topics_ok) {
            (true, true) => None,
            (false, true) => Some(Self::Tags),
            (true, false) => Some(Self::Topics),
            (false, false) => Some(Self::TagsAndTopics),
        }
    }

    /// Error reported by listing filters.
    pub fn filter_error(self) -> PostError {
        match self {
            Self::Tags => PostError::InvalidTags,
            Self::Topics => PostError::InvalidTopics,
            Self::TagsAndTopics => PostError::InvalidTagsAndTopics,
        }
    }

    /// Error reported by create/update payloads.
    pub fn mutation_error(self) -> PostError {
        match self {
            Self::Tags => PostError::TagDoesNotExist,
            Self::Topics => PostError::TopicDoesNotExist,
            Self::TagsAndTopics => PostError::InvalidTagsAndTopics,
        }
    }
}

/// Resolved listing filter. `None` means "do not filter on this".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedFilter {
    pub tag_ids: Option<Vec<TagId>>,
    pub topic_ids: Option<Vec<TopicId>>,
}

/// Trim, drop blanks, and collapse duplicates keeping first-seen order.
pub fn normalize_names(names: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    names
        .iter()
        .map(|name| name.trim())
        .filter(|name| !name.is_empty())
        .filter(|name| seen.insert(*name))
        .map(str::to_string)
        .collect()
}

/// Resolve tag names globally. Returns the ids and whether every name matched.
async fn resolve_tags(names: &[String], pool: &PgPool) -> sqlx::Result<(Vec<TagId>, bool)> {
    if names.is_empty() {
        return Ok((Vec::new(), true));
    }
    let tags = Tag::find_by_names(names, pool).await?;
    let found: HashSet<&str> = tags.iter().map(|t| t.name.as_str()).collect();
    let all_found = names.iter().all(|n| found.contains(n.as_str()));
    Ok((tags.into_iter().map(|t| t.id).collect(), all_found))
}

/// Resolve the `tags`/`topics` of a listing request within one agency.
pub async fn resolve_list_filter(
    tag_names: Option<&[String]>,
    topic_names: Option<&[String]>,
    agency_id: AgencyId,
    pool: &PgPool,
) -> Result<ResolvedFilter, PostError> {
    let tag_names = normalize_names(tag_names.unwrap_or_default());
    let topic_names = normalize_names(topic_names.unwrap_or_default());

    let (tag_ids, tags_ok) = resolve_tags(&tag_names, pool)
        .await
        .map_err(read_failed("resolve tags"))?;

    let (topic_ids, topics_ok) = if topic_names.is_empty() {
        (Vec::new(), true)
    } else {
        let topics = Topic::find_by_names_in_agency(&topic_names, agency_id, pool)
            .await
            .map_err(read_failed("resolve topics"))?;
        let found: HashSet<&str> = topics.iter().map(|t| t.name.as_str()).collect();
        let all_found = topic_names.iter().all(|n| found.contains(n.as_str()));
        (topics.into_iter().map(|t| t.id).collect(), all_found)
    };

    if let Some(unresolved) = UnresolvedReferences::classify(tags_ok, topics_ok) {
        return Err(unresolved.filter_error());
    }

    Ok(ResolvedFilter {
        tag_ids: (!tag_names.is_empty()).then_some(tag_ids),
        topic_ids: (!topic_names.is_empty()).then_some(topic_ids),
    })
}

/// Check a create/update payload. Returns the tag ids to sync.
pub async fn validate_post_references(
    tag_names: &[String],
    topic_id: Option<TopicId>,
    agency_id: AgencyId,
    pool: &PgPool,
) -> Result<Vec<TagId>, PostError> {
    let tag_names = normalize_names(tag_names);
    let (tag_ids, tags_ok) = resolve_tags(&tag_names, pool)
        .await
        .map_err(read_failed("resolve tags"))?;

    let topic_ok = match topic_id {
        Some(id) => Topic::exists_in_agency(id, agency_id, pool)
            .await
            .map_err(read_failed("resolve topic"))?,
        None => true,
    };

    match UnresolvedReferences::classify(tags_ok, topic_ok) {
        Some(unresolved) => Err(unresolved.mutation_error()),
        None => Ok(tag_ids),
    }
}
