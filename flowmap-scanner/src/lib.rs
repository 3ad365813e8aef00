use std::time::Duration;

pub mod crawler;
pub mod error;
pub mod extractor;
pub mod fetcher;
pub mod frontier;
pub mod normalize;
pub mod result;

pub use crawler::{Crawler, ProgressCallback};
pub use error::{FetchError, NormalizeError, ScanError};
pub use extractor::{Extracted, HtmlExtractor, LinkExtractor};
pub use fetcher::{HttpFetcher, PageFetcher};
pub use frontier::{CrawlTarget, Frontier};
pub use normalize::{Normalizer, normalize};
pub use result::{CrawlResult, FetchFailure, Page};

pub const DEFAULT_MAX_PAGES: usize = 50;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);
