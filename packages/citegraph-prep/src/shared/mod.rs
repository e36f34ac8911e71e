//! Shared models and services

pub mod models;
pub mod progress;
pub mod text;

pub use progress::ProgressReporter;
pub use text::TextNormalizer;
