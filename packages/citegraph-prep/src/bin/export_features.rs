//! Feature export CLI
//!
//! Builds every requested feature matrix for a citation batch and writes
//! one CSV per feature under the output root.
//!
//! # Usage
//!
//! ```bash
//! # All features with default parameters
//! export-features --citations data/training_set.txt --articles data/node_information.csv
//!
//! # Test pairs, graphs built from the training records
//! export-features --citations data/testing_set.txt --training data/training_set.txt \
//!     --articles data/node_information.csv --filename testing.csv
//!
//! # One parameterised feature
//! export-features --config export.yaml --feature similarity --param metric=pagerank
//! ```

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use citegraph_prep::config::{parse_override, ExportConfig};
use citegraph_prep::infrastructure::{load_articles, load_citations, sample_edges, DatasetStats};
use citegraph_prep::{
    CitationGraphSet, Corpus, ExporterSettings, ExtractorSession, FeatureCatalog,
    FeatureExporter,
};

#[derive(Parser)]
#[command(name = "export-features")]
#[command(about = "Citation network feature export for link prediction", long_about = None)]
struct Cli {
    /// Citation records to featurise (`source target [label]` per line)
    #[arg(long)]
    citations: Option<PathBuf>,

    /// Article metadata CSV
    #[arg(long)]
    articles: Option<PathBuf>,

    /// Labeled records the graphs are built from (defaults to --citations)
    #[arg(long)]
    training: Option<PathBuf>,

    /// Output root directory
    #[arg(long)]
    output_root: Option<PathBuf>,

    /// Feature to export (repeatable; all when absent)
    #[arg(long = "feature")]
    features: Vec<String>,

    /// Parameter override `key=value` (repeatable)
    #[arg(long = "param", value_parser = parse_param)]
    params: Vec<(String, String)>,

    /// Output file name inside each feature directory
    #[arg(long, default_value = "features.csv")]
    filename: String,

    /// YAML run configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log extraction progress
    #[arg(short, long)]
    verbose: bool,

    /// Rows between two progress lines
    #[arg(long)]
    progress_every: Option<usize>,

    /// Log dataset and graph statistics before exporting
    #[arg(long)]
    stats: bool,

    /// Featurise a seeded sample of this proportion of the citation records
    #[arg(long)]
    sample: Option<f64>,

    /// Sampling seed
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Print the feature catalog as JSON and exit
    #[arg(long)]
    list_features: bool,
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    parse_override(raw).map_err(|e| e.to_string())
}

impl Cli {
    /// YAML configuration (or defaults) with command-line flags applied on top
    fn export_config(&self) -> Result<ExportConfig, Box<dyn std::error::Error>> {
        let mut config = match &self.config {
            Some(path) => ExportConfig::from_yaml(path)?,
            None => ExportConfig::default(),
        };

        if let Some(root) = &self.output_root {
            config.output_root = root.clone();
        }
        if self.verbose {
            config.verbose = true;
        }
        if let Some(every) = self.progress_every {
            config.progress_every = every;
        }
        if self.citations.is_some() {
            config.citations = self.citations.clone();
        }
        if self.articles.is_some() {
            config.articles = self.articles.clone();
        }
        if !self.features.is_empty() {
            config.features = self.features.clone();
        }
        config.params.extend(self.params.iter().cloned());

        config.validate()?;
        Ok(config)
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing();

    if cli.list_features {
        let catalog = FeatureCatalog::global().describe();
        println!("{}", serde_json::to_string_pretty(&catalog)?);
        return Ok(());
    }

    let config = cli.export_config()?;
    let citations_path = config
        .citations
        .clone()
        .ok_or("--citations (or `citations` in the config) is required")?;
    let articles_path = config
        .articles
        .clone()
        .ok_or("--articles (or `articles` in the config) is required")?;

    let articles = load_articles(&articles_path)?;
    let mut edges = load_citations(&citations_path)?;
    let training = match &cli.training {
        Some(path) if *path != citations_path => load_citations(path)?,
        _ => edges.clone(),
    };
    let corpus = Arc::new(Corpus::new(articles, training));

    if let Some(proportion) = cli.sample {
        edges = sample_edges(&edges, proportion, cli.seed);
        info!("sampled {} citation records (seed {})", edges.len(), cli.seed);
    }

    if cli.stats {
        info!("citations: {}", DatasetStats::from_edges(&edges));
        info!("training: {}", DatasetStats::from_edges(&corpus.training));
        CitationGraphSet::build(&corpus)?;
    }

    let exporter = FeatureExporter::new(ExporterSettings::from(&config));
    let mut session = ExtractorSession::new();

    let paths = if config.features.is_empty() && config.params.is_empty() {
        exporter.export_all_to(&mut session, &edges, &corpus, &cli.filename)?
    } else {
        let mut paths = Vec::new();
        for kind in config.selected_kinds()? {
            exporter.compute_feature(&mut session, &edges, &corpus, kind.name(), &config.params)?;
            paths.push(exporter.export_to(&mut session, &cli.filename, kind.name(), &config.params)?);
        }
        paths
    };

    for path in &paths {
        info!("wrote {}", path.display());
    }
    info!("exported {} feature files", paths.len());
    Ok(())
}
