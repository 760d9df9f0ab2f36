//! Visibility rules for `public` vs `private` posts.
//!
//! Whether private posts show up publicly, and whether an owner may flip a post
//! between the two, is a product decision that has not been settled. The
//! behaviour is therefore configuration rather than code; the defaults hide
//! private posts and keep visibility fixed after creation.

use super::models::PostStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityPolicy {
    /// Status given to newly created posts.
    pub initial_status: PostStatus,
    /// Treat private posts like public ones in listings and direct lookups.
    pub list_private: bool,
    /// Accept `status` changes between public and private on update.
    pub allow_visibility_change: bool,
}

impl Default for VisibilityPolicy {
    fn default() -> Self {
        Self {
            initial_status: PostStatus::Public,
            list_private: false,
            allow_visibility_change: false,
        }
    }
}

impl VisibilityPolicy {
    /// Statuses a reader without special rights may see.
    pub fn visible_statuses(&self) -> &'static [PostStatus] {
        if self.list_private {
            &[PostStatus::Public, PostStatus::Private]
        } else {
            &[PostStatus::Public]
        }
    }
}

/// Settings the post activities read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostSettings {
    pub visibility: VisibilityPolicy,
    /// Upper bound on related posts returned with a single post.
    pub related_posts_limit: i64,
}

impl Default for PostSettings {
    fn default() -> Self {
        Self {
            visibility: VisibilityPolicy::default(),
            related_posts_limit: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn archived_is_never_visible() {
        for list_private in [false, true] {
            let policy = VisibilityPolicy {
                list_private,
                ..Default::default()
            };
            assert!(!policy.visible_statuses().contains(&PostStatus::Archived));
        }
    }

    #[test]
    fn private_posts_hidden_by_default() {
        let policy = VisibilityPolicy::default();
        assert_eq!(policy.visible_statuses(), &[PostStatus::Public]);
        assert_eq!(policy.initial_status, PostStatus::Public);
        assert!(!policy.allow_visibility_change);
    }
}
