//! HTTP mapping for post errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::domains::posts::PostError;

impl PostError {
    pub fn status_code(&self) -> StatusCode {
        if self.is_bad_request() {
            StatusCode::BAD_REQUEST
        } else if self.is_not_found() {
            StatusCode::NOT_FOUND
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for PostError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            // Details stay in the log; the body only carries the generic message.
            tracing::error!(error = ?self, "Request failed");
        }

        let body = Json(serde_json::json!({
            "message": self.to_string(),
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::PaginationError;

    #[test]
    fn status_codes_follow_error_kind() {
        assert_eq!(PostError::InvalidTags.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            PostError::InvalidPagination(PaginationError::SizeOutOfRange).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            PostError::VisibilityChangeNotAllowed.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(PostError::MissingPublicPost.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(PostError::PostUpdateFailed.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            PostError::WriteFailed { operation: "update post" }.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            PostError::Database(sqlx::Error::PoolTimedOut).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn body_carries_message_only() {
        let response = PostError::Database(sqlx::Error::PoolTimedOut).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, serde_json::json!({ "message": "Database error" }));
    }
}
