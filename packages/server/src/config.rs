use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

use crate::domains::posts::models::PostStatus;
use crate::domains::posts::policy::{PostSettings, VisibilityPolicy};

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub db_max_connections: u32,
    pub allowed_origins: Vec<String>,
    pub posts: PostSettings,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup (the process environment in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = PostSettings::default();

        let initial_status = match lookup("POST_INITIAL_STATUS") {
            Some(value) => {
                let status: PostStatus = value
                    .parse()
                    .context("POST_INITIAL_STATUS must be 'public' or 'private'")?;
                anyhow::ensure!(
                    !status.is_archived(),
                    "POST_INITIAL_STATUS cannot be 'archived'"
                );
                status
            }
            None => defaults.visibility.initial_status,
        };

        Ok(Self {
            database_url: lookup("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: lookup("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            db_max_connections: lookup("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|| "10".to_string())
                .parse()
                .context("DB_MAX_CONNECTIONS must be a valid number")?,
            allowed_origins: lookup("ALLOWED_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|o| o.trim().to_string())
                        .filter(|o| !o.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            posts: PostSettings {
                visibility: VisibilityPolicy {
                    initial_status,
                    list_private: flag(&lookup, "POST_LIST_PRIVATE")?
                        .unwrap_or(defaults.visibility.list_private),
                    allow_visibility_change: flag(&lookup, "POST_ALLOW_VISIBILITY_CHANGE")?
                        .unwrap_or(defaults.visibility.allow_visibility_change),
                },
                related_posts_limit: match lookup("RELATED_POSTS_LIMIT") {
                    Some(value) => value
                        .parse::<u16>()
                        .context("RELATED_POSTS_LIMIT must be a valid number")?
                        .into(),
                    None => defaults.related_posts_limit,
                },
            },
        })
    }
}

fn flag(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<bool>> {
    lookup(key)
        .map(|value| match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" => Ok(true),
            "0" | "false" | "no" => Ok(false),
            _ => Err(anyhow::anyhow!("{} must be true or false", key)),
        })
        .transpose()
}
