//! Offset pagination over filtered, sorted result sets.
//!
//! A [`PageRequest`] carries the optional 1-indexed `page` and `size` a client
//! sent. When both are present it resolves to a [`PageWindow`] (SQL
//! `LIMIT`/`OFFSET`); when either is missing the whole set is returned. The
//! total always counts the full filtered set, so clients can compute the number
//! of pages themselves.
//!
//! ```rust,ignore
//! let window = request.window()?;
//! let (limit, offset) = PageWindow::bind_values(window);
//! let total = Post::count_listed_tx(&filter, &mut *tx).await?;
//! let posts = Post::find_listed_tx(&filter, sort, limit, offset, &mut *tx).await?;
//! let page = Page::new(posts, total);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PaginationError {
    #[error("page must be at least 1")]
    PageOutOfRange,

    #[error("size must be at least 1")]
    SizeOutOfRange,
}

/// Pagination arguments as sent by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: Option<u32>,
    pub size: Option<u32>,
}

/// Resolved window into the result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub limit: i64,
    pub offset: i64,
}

impl PageRequest {
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page: Some(page),
            size: Some(size),
        }
    }

    /// No windowing: every matching row.
    pub fn all() -> Self {
        Self::default()
    }

    /// Resolve to a window, or `None` for "everything".
    pub fn window(&self) -> Result<Option<PageWindow>, PaginationError> {
        let (Some(page), Some(size)) = (self.page, self.size) else {
            return Ok(None);
        };
        if page < 1 {
            return Err(PaginationError::PageOutOfRange);
        }
        if size < 1 {
            return Err(PaginationError::SizeOutOfRange);
        }
        Ok(Some(PageWindow {
            limit: i64::from(size),
            offset: (i64::from(page) - 1) * i64::from(size),
        }))
    }
}

impl PageWindow {
    /// Values for a `LIMIT $n OFFSET $m` pair. Postgres treats `LIMIT NULL` as
    /// no limit.
    pub fn bind_values(window: Option<PageWindow>) -> (Option<i64>, i64) {
        match window {
            Some(w) => (Some(w.limit), w.offset),
            None => (None, 0),
        }
    }

    /// Number of rows this window yields out of `total`.
    pub fn expected_len(&self, total: i64) -> i64 {
        (total - self.offset).clamp(0, self.limit)
    }
}

/// One page of results plus the size of the full filtered set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub posts: Vec<T>,
    pub total_items: i64,
}

impl<T> Page<T> {
    pub fn new(posts: Vec<T>, total_items: i64) -> Self {
        Self { posts, total_items }
    }

    /// Window an already-loaded, already-sorted list.
    pub fn from_items(items: Vec<T>, request: &PageRequest) -> Result<Self, PaginationError> {
        let total_items = items.len() as i64;
        let posts = match request.window()? {
            None => items,
            Some(window) => items
                .into_iter()
                .skip(window.offset as usize)
                .take(window.limit as usize)
                .collect(),
        };
        Ok(Self { posts, total_items })
    }
}
