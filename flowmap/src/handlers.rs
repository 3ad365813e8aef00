use anyhow::Context;
use clap::ArgMatches;
use colored::Colorize;
use flowmap_core::FlowError;
use flowmap_core::crawl::{CrawlOptions, CrawlOutcome, CrawlRequest, execute_crawl};
use flowmap_core::layout::layout;
use flowmap_core::report::{
    ReportFormat, generate_dot_report, generate_json_report, generate_text_report, save_report,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;
use tracing::Level;
use url::Url;

/// Bad arguments, an unusable request, or a failed write.
pub const EXIT_FAILURE: u8 = 1;
/// The crawl ran but no page could be fetched.
pub const EXIT_EMPTY_RESULT: u8 = 2;

// Helper functions for crawl handler

/// Build a crawl request from either a request file or a single URL argument
pub fn load_request_from_source(
    url: Option<&str>,
    request_file: Option<&PathBuf>,
    max_depth: Option<usize>,
) -> Result<CrawlRequest, String> {
    let request = if let Some(request_file_path) = request_file {
        load_request_from_file(request_file_path)?
    } else if let Some(url) = url {
        let url = parse_url_line(url.trim()).ok_or_else(|| format!("Invalid URL '{}'", url))?;
        CrawlRequest::new(url)
    } else {
        return Err("Either --url or --request must be provided".to_string());
    };

    Ok(match max_depth {
        Some(depth) => request.with_max_depth(depth),
        None => request,
    })
}

/// Load and parse a JSON crawl request from a file
pub fn load_request_from_file(path: &Path) -> Result<CrawlRequest, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read request file {}: {}", path.display(), e))?;

    CrawlRequest::from_json(&content).map_err(|e| format!("{} ({})", e, path.display()))
}

/// Parse a seed argument as a URL, assuming http:// when no scheme is given.
///
/// `localhost:8080` has no `://` and is read as host and port, not as a `localhost:` URL.
pub fn parse_url_line(line: &str) -> Option<String> {
    let candidate = if line.contains("://") {
        line.to_string()
    } else {
        format!("http://{}", line)
    };
    Url::parse(&candidate).ok().map(|_| candidate)
}

/// Expand a leading `~` in an output path.
pub fn expand_output_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    PathBuf::from(shellexpand::tilde(raw.as_ref()).into_owned())
}

pub fn log_level(verbose: bool, quiet: bool) -> Level {
    if verbose {
        Level::DEBUG
    } else if quiet {
        Level::WARN
    } else {
        Level::INFO
    }
}

/// Logs go to stderr so reports on stdout stay machine-readable.
pub fn init_logging(verbose: bool, quiet: bool) {
    // A subscriber may already be installed, e.g. by an earlier test
    let _ = tracing_subscriber::fmt()
        .with_max_level(log_level(verbose, quiet))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

pub fn render_report(
    outcome: &CrawlOutcome,
    format: ReportFormat,
    with_layout: bool,
) -> Result<String, FlowError> {
    match format {
        ReportFormat::Text => Ok(generate_text_report(outcome)),
        ReportFormat::Json => {
            let positions = with_layout.then(|| layout(&outcome.response.graph()));
            Ok(generate_json_report(outcome, positions.as_ref())?)
        }
        ReportFormat::Dot => Ok(generate_dot_report(&outcome.response)),
    }
}

/// Print the report, or save it when an output path is given.
pub fn write_report(
    outcome: &CrawlOutcome,
    format: ReportFormat,
    with_layout: bool,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    if output.is_some() {
        // No escape codes in saved files
        colored::control::set_override(false);
    }

    let report = render_report(outcome, format, with_layout).context("Failed to render report")?;

    match output {
        Some(path) => {
            let path = expand_output_path(path);
            save_report(&report, &path)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            eprintln!(
                "{} Report saved to {}",
                "✓".green().bold(),
                path.display().to_string().bright_white()
            );
        }
        None => print!("{}", report),
    }

    Ok(())
}

fn print_divider() {
    eprintln!("{}", "═".repeat(60).bright_blue().bold());
}

pub async fn handle_crawl(sub_matches: &ArgMatches, quiet: bool) -> ExitCode {
    let url = sub_matches.get_one::<String>("url");
    let request_file = sub_matches.get_one::<PathBuf>("request");
    let max_depth = sub_matches.get_one::<usize>("max-depth").copied();
    let max_pages = sub_matches
        .get_one::<usize>("max-pages")
        .copied()
        .unwrap_or(flowmap_scanner::DEFAULT_MAX_PAGES);
    let threshold = sub_matches
        .get_one::<f64>("threshold")
        .copied()
        .unwrap_or(flowmap_core::noise::DEFAULT_THRESHOLD);
    let timeout = sub_matches
        .get_one::<u64>("timeout")
        .map(|ms| Duration::from_millis(*ms))
        .unwrap_or(flowmap_scanner::DEFAULT_TIMEOUT);
    let format = sub_matches
        .get_one::<String>("format")
        .and_then(|f| ReportFormat::from_str(f))
        .unwrap_or(ReportFormat::Text);
    let with_layout = sub_matches.get_flag("layout");
    let output = sub_matches.get_one::<PathBuf>("output");

    let request = match load_request_from_source(url.map(String::as_str), request_file, max_depth) {
        Ok(request) => request,
        Err(e) => {
            eprintln!("{} {}", "✗".red().bold(), e);
            return ExitCode::from(EXIT_FAILURE);
        }
    };

    if !quiet {
        print_divider();
        eprintln!(
            "{} {}",
            "  Mapping".bright_white().bold(),
            request.start_url.as_deref().unwrap_or("<missing>").bright_white()
        );
        print_divider();
        eprintln!("{} Max depth: {}", "→".blue(), request.max_depth);
        eprintln!("{} Max pages: {}", "→".blue(), max_pages);
        eprintln!("{} Boilerplate threshold: {}", "→".blue(), threshold);
        eprintln!();
    }

    let options = CrawlOptions {
        request,
        max_pages,
        threshold,
        timeout,
        show_progress_bars: !quiet,
    };

    let outcome = match execute_crawl(options, None).await {
        Ok(outcome) => outcome,
        Err(e) if e.is_recoverable() => {
            eprintln!("{} No pages found. Check the URL.", "⚠".yellow().bold());
            return ExitCode::from(EXIT_EMPTY_RESULT);
        }
        Err(e) if e.is_invalid_input() => {
            eprintln!("{} {}", "✗".red().bold(), e);
            return ExitCode::from(EXIT_FAILURE);
        }
        Err(e) => {
            eprintln!("{} Crawl failed: {}", "✗".red().bold(), e);
            return ExitCode::from(EXIT_FAILURE);
        }
    };

    if !quiet {
        eprintln!(
            "{} Crawl complete! {} pages, {} flow edges\n",
            "✓".green().bold(),
            outcome.response.crawled_count,
            outcome.response.edges.len()
        );
    }

    match write_report(&outcome, format, with_layout, output.map(PathBuf::as_path)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "✗".red().bold(), e);
            ExitCode::from(EXIT_FAILURE)
        }
    }
}
