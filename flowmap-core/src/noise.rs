// Boilerplate detection: links shared by a large share of pages (navigation bars,
// footers) carry no information about how a user moves through the site.

use flowmap_scanner::Page;
use std::collections::{HashMap, HashSet};

pub const DEFAULT_THRESHOLD: f64 = 0.3;

/// Number of distinct pages linking to each URL.
pub type LinkFrequency = HashMap<String, usize>;

pub type BoilerplateSet = HashSet<String>;

pub fn link_frequency(pages: &[Page]) -> LinkFrequency {
    let mut frequency = LinkFrequency::new();
    for page in pages {
        // Page links are already unique, but a hand-built page may repeat one
        let unique: HashSet<&String> = page.links.iter().collect();
        for link in unique {
            *frequency.entry(link.clone()).or_insert(0) += 1;
        }
    }
    frequency
}

/// Links whose share of pages strictly exceeds `threshold`.
pub fn compute_boilerplate(pages: &[Page], threshold: f64) -> BoilerplateSet {
    let total_pages = pages.len();
    if total_pages == 0 {
        return BoilerplateSet::new();
    }

    link_frequency(pages)
        .into_iter()
        .filter(|(_, count)| (*count as f64 / total_pages as f64) > threshold)
        .map(|(link, _)| link)
        .collect()
}
