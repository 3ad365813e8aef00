use crate::error::{FetchError, Result, ScanError};
use crate::extractor::{HtmlExtractor, LinkExtractor};
use crate::fetcher::{HttpFetcher, PageFetcher};
use crate::frontier::Frontier;
use crate::normalize::Normalizer;
use crate::result::{CrawlResult, FetchFailure, Page};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Called with the number of pages stored so far and the URL about to be fetched.
pub type ProgressCallback = Arc<dyn Fn(usize, String) + Send + Sync>;

pub struct Crawler<F = HttpFetcher, E = HtmlExtractor> {
    fetcher: F,
    extractor: E,
    max_pages: usize,
    timeout: Duration,
    progress_callback: Option<ProgressCallback>,
}

impl Crawler {
    pub fn new() -> Result<Self> {
        let fetcher = HttpFetcher::new()?;
        Ok(Self::with_collaborators(fetcher, HtmlExtractor))
    }
}

impl<F: PageFetcher, E: LinkExtractor> Crawler<F, E> {
    pub fn with_collaborators(fetcher: F, extractor: E) -> Self {
        Self {
            fetcher,
            extractor,
            max_pages: crate::DEFAULT_MAX_PAGES,
            timeout: crate::DEFAULT_TIMEOUT,
            progress_callback: None,
        }
    }

    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Breadth-first crawl of the seed's host.
    ///
    /// Every discovered link is resolved against `start_url` itself, not against the
    /// page it was found on. Per-page fetch failures are recorded in
    /// [`CrawlResult::failures`] and never abort the crawl; the only error is an
    /// unusable seed.
    pub async fn crawl(&self, start_url: &str, max_depth: usize) -> Result<CrawlResult> {
        let start_url = start_url.trim();
        if start_url.is_empty() {
            return Err(ScanError::InvalidInput("Start URL is required".to_string()));
        }

        let normalizer = Normalizer::new(start_url)
            .map_err(|e| ScanError::InvalidInput(format!("{}: {}", start_url, e)))?;
        let scheme = normalizer.base().scheme();
        if scheme != "http" && scheme != "https" {
            return Err(ScanError::InvalidInput(format!(
                "{}: unsupported scheme '{}'",
                start_url, scheme
            )));
        }
        let seed = normalizer
            .try_normalize(start_url)
            .map_err(|e| ScanError::InvalidInput(format!("{}: {}", start_url, e)))?;

        info!(
            "Starting crawl of {} (max depth {}, max pages {})",
            seed, max_depth, self.max_pages
        );

        let mut frontier = Frontier::new(seed);
        let mut pages: Vec<Page> = Vec::new();
        let mut failures = Vec::new();

        while pages.len() < self.max_pages {
            let Some(target) = frontier.next_target(max_depth) else {
                break;
            };

            if let Some(ref callback) = self.progress_callback {
                callback(pages.len(), target.url.clone());
            }

            let content = match self.fetch(&target.url).await {
                Ok(content) => content,
                Err(e) => {
                    warn!("Failed to crawl {}: {}", target.url, e);
                    failures.push(FetchFailure {
                        url: target.url,
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            let extracted = self.extractor.extract(&content);
            let title = extracted.title.unwrap_or_else(|| target.url.clone());

            let mut seen = HashSet::new();
            let mut links = Vec::new();
            for href in &extracted.hrefs {
                match normalizer.try_normalize(href) {
                    Ok(link) if link == target.url => {}
                    Ok(link) => {
                        if seen.insert(link.clone()) {
                            links.push(link);
                        }
                    }
                    Err(e) => debug!("Discarding link {}: {}", href, e),
                }
            }

            for link in &links {
                if !frontier.is_visited(link) {
                    frontier.push(link.clone(), target.depth + 1);
                }
            }

            debug!(
                "Crawled {} at depth {} ({} links)",
                target.url,
                target.depth,
                links.len()
            );
            pages.push(Page::new(target.url, title, links));
        }

        info!(
            "Crawl complete. Stored {} pages, {} failed",
            pages.len(),
            failures.len()
        );

        Ok(CrawlResult {
            pages,
            failures,
            visited: frontier.into_visited(),
        })
    }

    async fn fetch(&self, url: &str) -> std::result::Result<String, FetchError> {
        match tokio::time::timeout(self.timeout, self.fetcher.fetch(url, self.timeout)).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout),
        }
    }
}
