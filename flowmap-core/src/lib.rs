pub mod crawl;
pub mod error;
pub mod graph;
pub mod layout;
pub mod noise;
pub mod report;

pub use crawl::{
    CrawlOptions, CrawlOutcome, CrawlProgressCallback, CrawlRequest, CrawlResponse,
    execute_crawl, map_site,
};
pub use error::FlowError;
pub use graph::{Edge, Graph, Node, build_graph};
pub use layout::{Layout, NodePosition, layout};
pub use noise::{BoilerplateSet, LinkFrequency, compute_boilerplate, link_frequency};
