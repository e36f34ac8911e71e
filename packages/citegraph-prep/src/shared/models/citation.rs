//! Citation records

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ArticleId;

/// Ground-truth label of a (source, target) record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CitationLabel {
    /// `0`: source does not cite target
    NotCited,
    /// `1`: source cites target
    Cited,
}

impl CitationLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotCited => "0",
            Self::Cited => "1",
        }
    }
}

impl FromStr for CitationLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "0" => Ok(Self::NotCited),
            "1" => Ok(Self::Cited),
            other => Err(format!("label must be 0 or 1, got '{}'", other)),
        }
    }
}

impl fmt::Display for CitationLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One (source, target, label) record.
///
/// Unlabeled records (test pairs) carry `label: None` and never count as a
/// citation during graph construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CitationEdge {
    pub source: ArticleId,
    pub target: ArticleId,
    pub label: Option<CitationLabel>,
}

impl CitationEdge {
    pub fn new(source: ArticleId, target: ArticleId, label: CitationLabel) -> Self {
        Self {
            source,
            target,
            label: Some(label),
        }
    }

    /// Record without ground truth
    pub fn unlabeled(source: ArticleId, target: ArticleId) -> Self {
        Self {
            source,
            target,
            label: None,
        }
    }

    pub fn cited(source: ArticleId, target: ArticleId) -> Self {
        Self::new(source, target, CitationLabel::Cited)
    }

    pub fn not_cited(source: ArticleId, target: ArticleId) -> Self {
        Self::new(source, target, CitationLabel::NotCited)
    }

    /// True only for label `1`
    #[inline]
    pub fn is_citation(&self) -> bool {
        self.label == Some(CitationLabel::Cited)
    }
}
