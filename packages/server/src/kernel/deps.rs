//! Server dependencies for activities
//!
//! This module provides the central dependency container used by all domain
//! activities.

use sqlx::PgPool;

use crate::domains::posts::PostSettings;

// =============================================================================
// ServerDeps
// =============================================================================

/// Server dependencies accessible to activities
#[derive(Clone)]
pub struct ServerDeps {
    pub db_pool: PgPool,
    /// Visibility policy and related-post limit
    pub post_settings: PostSettings,
}

impl ServerDeps {
    /// Create new ServerDeps with the given dependencies
    pub fn new(db_pool: PgPool, post_settings: PostSettings) -> Self {
        Self {
            db_pool,
            post_settings,
        }
    }
}
