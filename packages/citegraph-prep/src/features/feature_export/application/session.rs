//! Single-slot extractor cache

use std::fmt;

use crate::config::FeatureParams;
use crate::features::feature_export::domain::{FeatureKind, FeatureMatrix};
use crate::features::feature_export::ports::FeatureExtractor;

/// Whether `compute_feature` hit or missed the session cache
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Bound extractor reused
    Reused,
    /// New extractor built, previous one dropped
    Constructed,
}

pub(crate) struct BoundExtractor {
    pub kind: FeatureKind,
    pub params: FeatureParams,
    pub extractor: Box<dyn FeatureExtractor>,
}

/// The active (feature, extractor) binding plus its latest matrix.
///
/// Two states: absent, or bound to one feature. Owned by the caller and
/// threaded through the exporter by `&mut`.
#[derive(Default)]
pub struct ExtractorSession {
    pub(crate) bound: Option<BoundExtractor>,
    pub(crate) matrix: Option<FeatureMatrix>,
}

impl ExtractorSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feature the session is bound to
    pub fn current_feature(&self) -> Option<FeatureKind> {
        self.bound.as_ref().map(|bound| bound.kind)
    }

    /// Parameters the bound extractor was built with
    pub fn current_params(&self) -> Option<&FeatureParams> {
        self.bound.as_ref().map(|bound| &bound.params)
    }

    /// Latest computed, not yet exported matrix
    pub fn matrix(&self) -> Option<&FeatureMatrix> {
        self.matrix.as_ref()
    }

    /// Take the pending matrix out, leaving the binding in place
    pub fn take_matrix(&mut self) -> Option<FeatureMatrix> {
        self.matrix.take()
    }

    /// Back to the absent state
    pub fn clear(&mut self) {
        self.bound = None;
        self.matrix = None;
    }
}

impl fmt::Debug for ExtractorSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractorSession")
            .field("feature", &self.current_feature())
            .field("params", &self.current_params())
            .field("matrix", &self.matrix.as_ref().map(|m| m.dim()))
            .finish()
    }
}
