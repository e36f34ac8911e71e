//! Dataset loading, sampling and summary statistics
//!
//! ## Formats
//! - Citations: one record per line, `source target [label]`, whitespace separated
//! - Articles: header-less CSV `id,year,title,authors,journal,abstract`

use ahash::AHashMap;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use tracing::info;

use crate::errors::{CitegraphError, Result};
use crate::shared::models::{
    parse_authors, Article, ArticleId, ArticleTable, CitationEdge, CitationLabel, Corpus,
};

const ARTICLE_FIELDS: usize = 6;

/// Load citation records from a file
pub fn load_citations(path: impl AsRef<Path>) -> Result<Vec<CitationEdge>> {
    let path = path.as_ref();
    let edges = parse_citations(BufReader::new(File::open(path)?), &path.display().to_string())?;
    info!("loaded {} citation records from {}", edges.len(), path.display());
    Ok(edges)
}

/// Parse citation records; `origin` prefixes error locations
pub fn parse_citations(reader: impl BufRead, origin: &str) -> Result<Vec<CitationEdge>> {
    let mut edges = Vec::new();
    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        let location = || format!("{}:{}", origin, number + 1);
        let tokens: Vec<&str> = line.split_whitespace().collect();

        let edge = match tokens.as_slice() {
            [] => continue,
            [source, target] => {
                CitationEdge::unlabeled(parse_id(source, &location)?, parse_id(target, &location)?)
            }
            [source, target, label] => CitationEdge::new(
                parse_id(source, &location)?,
                parse_id(target, &location)?,
                label
                    .parse::<CitationLabel>()
                    .map_err(|message| CitegraphError::parse(location(), message))?,
            ),
            _ => {
                return Err(CitegraphError::parse(
                    location(),
                    format!("expected 2 or 3 fields, got {}", tokens.len()),
                ))
            }
        };
        edges.push(edge);
    }
    Ok(edges)
}

fn parse_id(token: &str, location: &impl Fn() -> String) -> Result<ArticleId> {
    token
        .parse()
        .map_err(|_| CitegraphError::parse(location(), format!("invalid article id '{}'", token)))
}

/// Load the article metadata table from a file
pub fn load_articles(path: impl AsRef<Path>) -> Result<ArticleTable> {
    let path = path.as_ref();
    let table = parse_articles(File::open(path)?, &path.display().to_string())?;
    info!("loaded {} articles from {}", table.len(), path.display());
    Ok(table)
}

/// Parse header-less article CSV rows, keeping file order
pub fn parse_articles(reader: impl Read, origin: &str) -> Result<ArticleTable> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(reader);

    let mut articles = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let line = record.position().map_or(0, |position| position.line());
        let location = || format!("{}:{}", origin, line);

        if record.len() != ARTICLE_FIELDS {
            return Err(CitegraphError::parse(
                location(),
                format!("expected {} fields, got {}", ARTICLE_FIELDS, record.len()),
            ));
        }

        let id = parse_id(record[0].trim(), &location)?;
        let year = record[1].trim().parse::<i32>().map_err(|_| {
            CitegraphError::parse(location(), format!("invalid year '{}'", &record[1]))
        })?;

        articles.push(Article {
            id,
            year,
            title: record[2].to_string(),
            authors: parse_authors(Some(&record[3])),
            journal: record[4].trim().to_string(),
            abstract_text: record[5].to_string(),
        });
    }

    ArticleTable::new(articles)
}

/// Load metadata plus the training records graphs are built from
pub fn load_corpus(articles: impl AsRef<Path>, training: impl AsRef<Path>) -> Result<Corpus> {
    Ok(Corpus::new(load_articles(articles)?, load_citations(training)?))
}

/// Seeded sample with replacement of `floor(len * proportion)` records
pub fn sample_edges(edges: &[CitationEdge], proportion: f64, seed: u64) -> Vec<CitationEdge> {
    if edges.is_empty() {
        return Vec::new();
    }
    let count = (edges.len() as f64 * proportion.max(0.0)).floor() as usize;
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| edges[rng.random_range(0..edges.len())])
        .collect()
}

/// Citation counts per source and per target (unlabeled records count 0)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatasetStats {
    pub rows: usize,
    pub unique_sources: usize,
    pub max_citations_by_source: usize,
    pub sources_without_citations: usize,
    pub max_citations_received: usize,
    pub targets_never_cited: usize,
}

impl DatasetStats {
    pub fn from_edges(edges: &[CitationEdge]) -> Self {
        let mut by_source: AHashMap<ArticleId, usize> = AHashMap::new();
        let mut by_target: AHashMap<ArticleId, usize> = AHashMap::new();
        for edge in edges {
            let cited = usize::from(edge.is_citation());
            *by_source.entry(edge.source).or_insert(0) += cited;
            *by_target.entry(edge.target).or_insert(0) += cited;
        }

        Self {
            rows: edges.len(),
            unique_sources: by_source.len(),
            max_citations_by_source: by_source.values().copied().max().unwrap_or(0),
            sources_without_citations: by_source.values().filter(|&&n| n == 0).count(),
            max_citations_received: by_target.values().copied().max().unwrap_or(0),
            targets_never_cited: by_target.values().filter(|&&n| n == 0).count(),
        }
    }
}

impl fmt::Display for DatasetStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} rows, {} unique sources, top source cites {}, {} sources cite nothing, \
             top target cited {} times, {} targets never cited",
            self.rows,
            self.unique_sources,
            self.max_citations_by_source,
            self.sources_without_citations,
            self.max_citations_received,
            self.targets_never_cited
        )
    }
}
