use crate::error::{FlowError, Result};
use crate::graph::{Edge, Graph, Node, build_graph};
use crate::noise::{DEFAULT_THRESHOLD, compute_boilerplate};
use flowmap_scanner::{CrawlResult, Crawler, FetchFailure, HttpFetcher, HtmlExtractor};
use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use url::Url;

pub const DEFAULT_MAX_DEPTH: usize = 2;

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

/// Body of a crawl request, e.g. `{"startUrl": "https://example.com", "maxDepth": 1}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlRequest {
    #[serde(default)]
    pub start_url: Option<String>,
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

impl CrawlRequest {
    pub fn new(start_url: impl Into<String>) -> Self {
        Self {
            start_url: Some(start_url.into()),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| FlowError::InvalidInput(format!("Malformed crawl request: {}", e)))
    }

    /// The seed URL, rejecting a missing or blank one.
    pub fn start_url(&self) -> Result<&str> {
        match self.start_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => Ok(url),
            _ => Err(FlowError::InvalidInput("Start URL is required".to_string())),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlResponse {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub crawled_count: usize,
}

impl CrawlResponse {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn graph(&self) -> Graph {
        Graph {
            nodes: self.nodes.clone(),
            edges: self.edges.clone(),
        }
    }
}

/// A response plus what was filtered out or skipped along the way.
#[derive(Debug, Clone, Default)]
pub struct CrawlOutcome {
    pub response: CrawlResponse,
    /// Sorted for stable output.
    pub boilerplate: Vec<String>,
    pub failures: Vec<FetchFailure>,
}

/// Options for configuring a crawl operation
pub struct CrawlOptions {
    pub request: CrawlRequest,
    pub max_pages: usize,
    pub threshold: f64,
    pub timeout: Duration,
    pub show_progress_bars: bool,
}

impl CrawlOptions {
    pub fn new(request: CrawlRequest) -> Self {
        Self {
            request,
            max_pages: flowmap_scanner::DEFAULT_MAX_PAGES,
            threshold: DEFAULT_THRESHOLD,
            timeout: flowmap_scanner::DEFAULT_TIMEOUT,
            show_progress_bars: false,
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.request.start_url()?;
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(FlowError::InvalidInput(format!(
                "Threshold must be between 0 and 1, got {}",
                self.threshold
            )));
        }
        if self.max_pages == 0 {
            return Err(FlowError::InvalidInput(
                "Max pages must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Callback for reporting crawl progress
pub type CrawlProgressCallback = Arc<dyn Fn(String) + Send + Sync>;

/// Extract the path component from a URL
pub fn extract_url_path(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) if !parsed.path().is_empty() => parsed.path().to_string(),
        Ok(_) => "/".to_string(),
        Err(_) => url.to_string(),
    }
}

/// Filters boilerplate out of a finished crawl and turns it into a graph.
pub fn map_site(result: &CrawlResult, threshold: f64) -> CrawlOutcome {
    let boilerplate = compute_boilerplate(&result.pages, threshold);
    let graph = build_graph(&result.pages, &boilerplate);

    let mut boilerplate: Vec<String> = boilerplate.into_iter().collect();
    boilerplate.sort();

    CrawlOutcome {
        response: CrawlResponse {
            nodes: graph.nodes,
            edges: graph.edges,
            crawled_count: result.len(),
        },
        boilerplate,
        failures: result.failures.clone(),
    }
}

/// Execute a crawl with the given options.
///
/// Fails with [`FlowError::InvalidInput`] before any request is made if the options
/// are unusable, and with the recoverable [`FlowError::EmptyResult`] if no page could
/// be fetched.
pub async fn execute_crawl(
    options: CrawlOptions,
    progress_callback: Option<CrawlProgressCallback>,
) -> Result<CrawlOutcome> {
    options.validate()?;
    let start_url = options.request.start_url()?.to_string();

    let progress_bar = if options.show_progress_bars {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            pb.set_style(style);
        }
        pb.set_message("Starting crawl...");
        Some(pb)
    } else {
        None
    };

    let internal_progress: flowmap_scanner::ProgressCallback = {
        let pb = progress_bar.clone();
        let callback = progress_callback.clone();
        Arc::new(move |stored: usize, url: String| {
            if let Some(ref pb) = pb {
                pb.set_message(format!("Crawling... {} pages stored, fetching {}", stored, url));
                pb.tick();
            }
            if let Some(ref callback) = callback {
                callback(format!("Crawling {}", url));
            }
        })
    };

    let fetcher =
        HttpFetcher::with_timeout(options.timeout).map_err(flowmap_scanner::ScanError::from)?;
    let crawler = Crawler::with_collaborators(fetcher, HtmlExtractor)
        .with_max_pages(options.max_pages)
        .with_timeout(options.timeout)
        .with_progress_callback(internal_progress);

    let crawl = crawler.crawl(&start_url, options.request.max_depth).await;

    if let Some(ref pb) = progress_bar {
        pb.finish_and_clear();
    }

    let result = crawl?;
    let outcome = map_site(&result, options.threshold);

    info!(
        "Mapped {}: {} nodes, {} edges, {} boilerplate links",
        start_url,
        outcome.response.nodes.len(),
        outcome.response.edges.len(),
        outcome.boilerplate.len()
    );

    if outcome.response.is_empty() {
        return Err(FlowError::EmptyResult { start_url });
    }

    Ok(outcome)
}
