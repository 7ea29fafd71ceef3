//! Paginated data-points responses.
//!
//! The API paginates in one of two ways:
//! - **Page count**: `meta.last_page` plus `meta.path` (base URL without query)
//! - **Cursor**: `links.next` holds the next page URL, absent or null at the end

use serde::{Deserialize, Serialize};

use super::reading::Reading;

/// One page of the data-points endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResponse {
    /// Readings on this page, in API order.
    pub data: Vec<Reading>,
    /// Page-count pagination metadata.
    #[serde(default)]
    pub meta: Option<PageMeta>,
    /// Cursor pagination links.
    #[serde(default)]
    pub links: Option<PageLinks>,
}

impl PageResponse {
    /// Returns the last page number, if the page carries one.
    pub fn last_page(&self) -> Option<u32> {
        self.meta.as_ref().and_then(|m| m.last_page)
    }

    /// Returns true if more pages follow according to `meta.last_page`.
    pub fn has_more_pages(&self) -> bool {
        self.last_page().is_some_and(|last| last > 1)
    }

    /// Returns the next cursor URL, treating empty strings as the end.
    pub fn next_link(&self) -> Option<&str> {
        self.links
            .as_ref()
            .and_then(|l| l.next.as_deref())
            .filter(|next| !next.is_empty())
    }
}

/// Page-count pagination metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    /// Current page number.
    #[serde(default)]
    pub current_page: Option<u32>,
    /// Number of the last page.
    #[serde(default)]
    pub last_page: Option<u32>,
    /// Base path for the endpoint, without the `page` query.
    #[serde(default)]
    pub path: Option<String>,
}

/// Cursor pagination links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLinks {
    /// URL of the next page.
    #[serde(default)]
    pub next: Option<String>,
}
