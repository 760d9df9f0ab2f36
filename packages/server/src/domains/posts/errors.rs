use thiserror::Error;

use crate::common::PaginationError;

/// Failures of the post operations.
///
/// Reference and validation errors mean the caller's input was wrong and
/// nothing was written. `WriteFailed` and `Database` mean the store could not
/// complete the work; their messages never include storage details.
#[derive(Error, Debug)]
pub enum PostError {
    // Reference errors (list filters)
    #[error("Invalid tags used in request")]
    InvalidTags,

    #[error("Invalid topics used in request")]
    InvalidTopics,

    #[error("Invalid tags and topics used in request")]
    InvalidTagsAndTopics,

    // Reference errors (create/update payloads)
    #[error("Tag does not exist")]
    TagDoesNotExist,

    #[error("Topic does not exist")]
    TopicDoesNotExist,

    // Not found
    #[error("Public post not found")]
    MissingPublicPost,

    #[error("Unable to find user with given ID")]
    MissingUser,

    #[error("Agency not found")]
    MissingAgency,

    // Validation
    #[error("Invalid pagination: {0}")]
    InvalidPagination(#[from] PaginationError),

    #[error("Post visibility cannot be changed")]
    VisibilityChangeNotAllowed,

    // Write failures
    #[error("Post update failed")]
    PostUpdateFailed,

    #[error("Unable to {operation}")]
    WriteFailed { operation: &'static str },

    // Infrastructure
    #[error("Database error")]
    Database(#[from] sqlx::Error),
}

impl PostError {
    /// Input was wrong (as opposed to missing resources or an unavailable store).
    pub fn is_bad_request(&self) -> bool {
        matches!(
            self,
            PostError::InvalidTags
                | PostError::InvalidTopics
                | PostError::InvalidTagsAndTopics
                | PostError::TagDoesNotExist
                | PostError::TopicDoesNotExist
                | PostError::InvalidPagination(_)
                | PostError::VisibilityChangeNotAllowed
        )
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            PostError::MissingPublicPost
                | PostError::MissingUser
                | PostError::MissingAgency
                | PostError::PostUpdateFailed
        )
    }
}

/// Log a storage failure inside a write with its operation context and turn it
/// into the generic write failure the caller sees.
pub(crate) fn write_failed(operation: &'static str) -> impl FnOnce(sqlx::Error) -> PostError {
    move |error| {
        tracing::error!(operation, error = %error, "Post write failed, transaction rolled back");
        PostError::WriteFailed { operation }
    }
}

/// Log a storage failure on a read path with its operation context. The caller
/// still sees the generic database error.
pub(crate) fn read_failed(operation: &'static str) -> impl FnOnce(sqlx::Error) -> PostError {
    move |error| {
        tracing::error!(operation, error = %error, "Post read failed");
        PostError::Database(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_errors_are_bad_requests() {
        for err in [
            PostError::InvalidTags,
            PostError::InvalidTopics,
            PostError::InvalidTagsAndTopics,
            PostError::TagDoesNotExist,
            PostError::TopicDoesNotExist,
        ] {
            assert!(err.is_bad_request(), "{err}");
            assert!(!err.is_not_found(), "{err}");
        }
    }

    #[test]
    fn storage_errors_are_neither_input_nor_missing() {
        let err = PostError::from(sqlx::Error::PoolTimedOut);
        assert!(!err.is_bad_request());
        assert!(!err.is_not_found());
        assert_eq!(err.to_string(), "Database error");

        let err = read_failed("list posts")(sqlx::Error::PoolClosed);
        assert!(matches!(err, PostError::Database(sqlx::Error::PoolClosed)));
        assert_eq!(err.to_string(), "Database error");

        let err = write_failed("create post")(sqlx::Error::PoolClosed);
        assert!(matches!(err, PostError::WriteFailed { operation: "create post" }));
        assert_eq!(err.to_string(), "Unable to create post");
    }

    #[test]
    fn messages_match_what_clients_expect() {
        assert_eq!(PostError::PostUpdateFailed.to_string(), "Post update failed");
        assert_eq!(
            PostError::MissingUser.to_string(),
            "Unable to find user with given ID"
        );
    }
}
