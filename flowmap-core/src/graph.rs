use crate::noise::BoilerplateSet;
use flowmap_scanner::Page;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const LABEL_MAX_CHARS: usize = 30;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// The page URL.
    pub id: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Graph {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Shortens a page title for display, marking the cut with "...".
pub fn truncate_label(title: &str) -> String {
    if title.chars().count() > LABEL_MAX_CHARS {
        let head: String = title.chars().take(LABEL_MAX_CHARS).collect();
        format!("{}...", head)
    } else {
        title.to_string()
    }
}

pub fn edge_id(source: &str, target: &str) -> String {
    format!("{}-{}", source, target)
}

/// One node per page, and one edge per link whose target was crawled and is not boilerplate.
pub fn build_graph(pages: &[Page], boilerplate: &BoilerplateSet) -> Graph {
    let nodes = pages
        .iter()
        .map(|page| Node {
            id: page.url.clone(),
            label: truncate_label(&page.title),
        })
        .collect();

    let crawled: HashSet<&str> = pages.iter().map(|page| page.url.as_str()).collect();
    let mut added = HashSet::new();
    let mut edges = Vec::new();

    for page in pages {
        for target in &page.links {
            if !crawled.contains(target.as_str()) || boilerplate.contains(target) {
                continue;
            }
            let id = edge_id(&page.url, target);
            if added.insert(id.clone()) {
                edges.push(Edge {
                    id,
                    source: page.url.clone(),
                    target: target.clone(),
                });
            }
        }
    }

    Graph { nodes, edges }
}
