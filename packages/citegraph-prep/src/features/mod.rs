//! Feature modules
//!
//! - `citation_graph`: article, author-citation and author-collaboration graphs
//! - `extractors`: one feature computation per kind
//! - `feature_export`: catalog, extractor session and CSV export

pub mod citation_graph;
pub mod extractors;
pub mod feature_export;
