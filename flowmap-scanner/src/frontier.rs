use std::collections::{HashSet, VecDeque};

/// A URL waiting to be crawled and its hop count from the seed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlTarget {
    pub url: String,
    pub depth: usize,
}

/// FIFO work queue plus the set of URLs already taken off it for fetching.
#[derive(Debug, Default)]
pub struct Frontier {
    queue: VecDeque<CrawlTarget>,
    visited: HashSet<String>,
}

impl Frontier {
    pub fn new(seed: String) -> Self {
        let mut frontier = Self::default();
        frontier.push(seed, 0);
        frontier
    }

    pub fn push(&mut self, url: String, depth: usize) {
        self.queue.push_back(CrawlTarget { url, depth });
    }

    /// Next target that is unvisited and within `max_depth`, marked visited on return.
    pub fn next_target(&mut self, max_depth: usize) -> Option<CrawlTarget> {
        while let Some(target) = self.queue.pop_front() {
            if target.depth > max_depth || self.visited.contains(&target.url) {
                continue;
            }
            self.visited.insert(target.url.clone());
            return Some(target);
        }
        None
    }

    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn into_visited(self) -> HashSet<String> {
        self.visited
    }
}
