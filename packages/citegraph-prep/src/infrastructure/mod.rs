//! Input data access

pub mod dataset;

pub use dataset::{
    load_articles, load_citations, load_corpus, parse_articles, parse_citations, sample_edges,
    DatasetStats,
};
