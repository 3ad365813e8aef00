// Report generation from a mapped crawl

use crate::crawl::{CrawlOutcome, CrawlResponse, extract_url_path};
use crate::layout::{Layout, to_petgraph};
use colored::Colorize;
use flowmap_scanner::FetchFailure;
use petgraph::dot::{Config, Dot};
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
    Dot,
}

impl ReportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" => Some(ReportFormat::Text),
            "json" => Some(ReportFormat::Json),
            "dot" | "graphviz" => Some(ReportFormat::Dot),
            _ => None,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport<'a> {
    #[serde(flatten)]
    response: &'a CrawlResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    layout: Option<&'a Layout>,
    boilerplate: &'a [String],
    failures: &'a [FetchFailure],
    generated_at: String,
}

pub fn generate_text_report(outcome: &CrawlOutcome) -> String {
    let response = &outcome.response;
    let mut report = String::new();

    report.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");
    report.push_str(&format!("{}\n", "# Summary:".bold()));
    report.push_str(&format!("  Pages crawled: {}\n", response.crawled_count));
    report.push_str(&format!("  Flow edges: {}\n", response.edges.len()));
    report.push_str(&format!(
        "  Boilerplate links suppressed: {}\n",
        outcome.boilerplate.len()
    ));
    report.push_str(&format!("  Failed fetches: {}\n", outcome.failures.len()));
    report.push_str("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");

    report.push_str(&format!("{}\n", "## Pages".bold()));
    for node in &response.nodes {
        report.push_str(&format!(
            "  {} {}\n",
            extract_url_path(&node.id).green(),
            node.label.bright_black()
        ));
        for edge in response.edges.iter().filter(|e| e.source == node.id) {
            report.push_str(&format!("      → {}\n", extract_url_path(&edge.target)));
        }
    }

    if !outcome.boilerplate.is_empty() {
        report.push_str(&format!("\n{}\n", "## Boilerplate".bold()));
        for link in &outcome.boilerplate {
            report.push_str(&format!("  {}\n", extract_url_path(link).cyan()));
        }
    }

    if !outcome.failures.is_empty() {
        report.push_str(&format!("\n{}\n", "## Failed".bold()));
        for failure in &outcome.failures {
            report.push_str(&format!(
                "  {} {}\n",
                extract_url_path(&failure.url).red(),
                failure.reason.bright_black()
            ));
        }
    }

    report
}

pub fn generate_json_report(
    outcome: &CrawlOutcome,
    layout: Option<&Layout>,
) -> Result<String, serde_json::Error> {
    let report = JsonReport {
        response: &outcome.response,
        layout,
        boilerplate: &outcome.boilerplate,
        failures: &outcome.failures,
        generated_at: chrono::Utc::now().to_rfc3339(),
    };
    serde_json::to_string_pretty(&report)
}

/// Graphviz rendering, labelled with page titles.
pub fn generate_dot_report(response: &CrawlResponse) -> String {
    let graph = response.graph();
    let digraph = to_petgraph(&graph);
    let labelled = digraph.map(|_, node| node.label.clone(), |_, _| String::new());
    format!("{}", Dot::with_config(&labelled, &[Config::EdgeNoLabel]))
}

pub fn save_report(content: &str, path: &Path) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}
