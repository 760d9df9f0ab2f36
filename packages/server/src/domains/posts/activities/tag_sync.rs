//! Bring a post's tag associations in line with a requested set.

use std::collections::HashSet;

use sqlx::PgConnection;
use tracing::debug;

use crate::common::{PostId, TagId};
use crate::domains::tag::PostTag;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TagSyncOutcome {
    pub added: u64,
    pub removed: u64,
}

/// Ids to insert and ids to delete so that `current` becomes `target`.
pub fn diff(current: &[TagId], target: &[TagId]) -> (Vec<TagId>, Vec<TagId>) {
    let current_set: HashSet<TagId> = current.iter().copied().collect();
    let target_set: HashSet<TagId> = target.iter().copied().collect();

    let mut to_add: Vec<TagId> = target_set.difference(&current_set).copied().collect();
    let mut to_remove: Vec<TagId> = current_set.difference(&target_set).copied().collect();
    to_add.sort();
    to_remove.sort();
    (to_add, to_remove)
}

/// Apply the minimal inserts/deletes on the caller's transaction.
/// Tags are expected to exist; nothing here creates or validates them.
pub async fn sync_post_tags_tx(
    post_id: PostId,
    target: &[TagId],
    conn: &mut PgConnection,
) -> sqlx::Result<TagSyncOutcome> {
    let current = PostTag::tag_ids_for_post_tx(post_id, conn).await?;
    let (to_add, to_remove) = diff(&current, target);

    let mut outcome = TagSyncOutcome::default();
    if !to_remove.is_empty() {
        outcome.removed = PostTag::delete_many_tx(post_id, &to_remove, conn).await?;
    }
    if !to_add.is_empty() {
        outcome.added = PostTag::insert_many_tx(post_id, &to_add, conn).await?;
    }

    debug!(
        post_id = %post_id,
        added = outcome.added,
        removed = outcome.removed,
        "Synced post tags"
    );
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: usize) -> Vec<TagId> {
        let mut ids: Vec<TagId> = (0..n).map(|_| TagId::new()).collect();
        ids.sort();
        ids
    }

    #[test]
    fn same_set_is_a_noop() {
        let tags = ids(3);
        let mut shuffled = tags.clone();
        shuffled.reverse();
        let (add, remove) = diff(&tags, &shuffled);
        assert!(add.is_empty());
        assert!(remove.is_empty());
    }

    #[test]
    fn computes_both_directions() {
        let tags = ids(4);
        let current = vec![tags[0], tags[1], tags[2]];
        let target = vec![tags[1], tags[2], tags[3]];
        let (add, remove) = diff(&current, &target);
        assert_eq!(add, vec![tags[3]]);
        assert_eq!(remove, vec![tags[0]]);
    }

    #[test]
    fn duplicate_targets_are_added_once() {
        let tags = ids(1);
        let (add, remove) = diff(&[], &[tags[0], tags[0]]);
        assert_eq!(add, vec![tags[0]]);
        assert!(remove.is_empty());
    }

    #[test]
    fn empty_target_clears() {
        let tags = ids(2);
        let (add, remove) = diff(&tags, &[]);
        assert!(add.is_empty());
        assert_eq!(remove, tags);
    }
}
