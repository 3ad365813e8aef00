use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A fetched page and the same-origin links it points to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub url: String,
    pub title: String,
    /// Normalized, deduplicated, in first-seen order.
    pub links: Vec<String>,
}

impl Page {
    pub fn new(url: String, title: String, links: Vec<String>) -> Self {
        Self { url, title, links }
    }
}

/// A page that was visited but could not be fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchFailure {
    pub url: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CrawlResult {
    /// Stored pages in visitation order.
    pub pages: Vec<Page>,
    pub failures: Vec<FetchFailure>,
    /// Every URL dequeued for fetching, successful or not.
    pub visited: HashSet<String>,
}

impl CrawlResult {
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn contains(&self, url: &str) -> bool {
        self.pages.iter().any(|page| page.url == url)
    }
}
