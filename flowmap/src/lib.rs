pub mod commands;
pub mod handlers;

// Re-export commonly used handler functions for convenience
pub use handlers::{
    expand_output_path, load_request_from_file, load_request_from_source, parse_url_line,
    render_report, write_report,
};

// Re-export crawl functionality from flowmap-core
pub use flowmap_core::crawl::{
    CrawlOptions, CrawlOutcome, CrawlRequest, execute_crawl,
    extract_url_path,
};
