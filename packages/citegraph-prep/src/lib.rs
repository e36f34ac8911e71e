/*
 * citegraph-prep - citation network link-prediction preprocessing
 *
 * Feature-First Hexagonal Architecture:
 * - shared/          : Article and citation models, text normalisation, progress
 * - features/        : Vertical slices (citation_graph → extractors → feature_export)
 * - config/          : Typed feature parameters and YAML run configuration
 * - infrastructure/  : Dataset loading, sampling and statistics
 *
 * Flow:
 *   citations + article metadata ──▶ graph builders ──▶ extractors ──▶ CSV per feature
 */

// Crate-level lint configuration
#![allow(clippy::type_complexity)] // Factory and pair-list types
#![allow(clippy::needless_range_loop)] // Range loop for column indexing
#![allow(clippy::new_without_default)] // Default impl not always needed

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports - Feature-First Architecture
// ═══════════════════════════════════════════════════════════════════════════

/// Shared models and services
pub mod shared;

/// Feature modules (vertical slices)
pub mod features;

/// Configuration system
pub mod config;

/// Error types
pub mod errors;

/// Input data access
pub mod infrastructure;

pub use errors::{CitegraphError, Result};
pub use features::citation_graph::{
    ArticleGraph, ArticleGraphBuilder, AuthorCitationGraph, AuthorCitationGraphBuilder,
    AuthorCollaborationGraph, AuthorCollaborationGraphBuilder, CitationGraphSet,
};
pub use features::feature_export::{
    ExporterSettings, ExtractorSession, FeatureCatalog, FeatureExporter, FeatureKind,
    FeatureMatrix, SessionOutcome,
};
pub use shared::models::{Article, ArticleId, ArticleTable, CitationEdge, CitationLabel, Corpus};
