//! PageRank over petgraph graphs
//!
//! ```text
//! PR(v) = (1-d)/N + d * (Σ PR(u)/outdegree(u) + D/N)
//!                        u→v
//!
//! where:
//!   d = damping factor (0.85)
//!   N = number of nodes
//!   D = total score of nodes without outgoing edges
//! ```
//!
//! Undirected edges count in both directions. Parallel edges count once per
//! copy, weights are ignored.

use petgraph::graph::Graph;
use petgraph::visit::EdgeRef;
use petgraph::EdgeType;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// PageRank configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageRankSettings {
    /// Damping factor
    pub damping: f64,

    /// Iteration cap
    pub max_iterations: usize,

    /// Stop once the largest per-node change falls below this
    pub tolerance: f64,
}

impl Default for PageRankSettings {
    fn default() -> Self {
        Self {
            damping: 0.85,
            max_iterations: 100,
            tolerance: 1e-8,
        }
    }
}

/// PageRank engine
pub struct PageRankEngine {
    settings: PageRankSettings,
}

impl PageRankEngine {
    pub fn new(settings: PageRankSettings) -> Self {
        Self { settings }
    }

    /// Scores indexed by node index; they sum to 1 for a non-empty graph
    pub fn compute<N, E, Ty: EdgeType>(&self, graph: &Graph<N, E, Ty>) -> Vec<f64> {
        let n = graph.node_count();
        if n == 0 {
            return Vec::new();
        }

        // Incoming adjacency + out-degrees, O(E)
        let mut incoming: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut outdegrees = vec![0usize; n];
        for edge in graph.edge_references() {
            let (a, b) = (edge.source().index(), edge.target().index());
            incoming[b].push(a);
            outdegrees[a] += 1;
            if !graph.is_directed() {
                incoming[a].push(b);
                outdegrees[b] += 1;
            }
        }

        let damping = self.settings.damping;
        let uniform = 1.0 / n as f64;
        let mut scores = vec![uniform; n];

        for iteration in 0..self.settings.max_iterations {
            let dangling: f64 = scores
                .iter()
                .zip(&outdegrees)
                .filter(|(_, &degree)| degree == 0)
                .map(|(score, _)| score)
                .sum();
            let base = (1.0 - damping) * uniform + damping * dangling * uniform;

            let next: Vec<f64> = incoming
                .iter()
                .map(|sources| {
                    let incoming_sum: f64 = sources
                        .iter()
                        .map(|&u| scores[u] / outdegrees[u] as f64)
                        .sum();
                    base + damping * incoming_sum
                })
                .collect();

            let max_delta = next
                .iter()
                .zip(&scores)
                .map(|(new, old)| (new - old).abs())
                .fold(0.0_f64, f64::max);
            scores = next;

            if max_delta < self.settings.tolerance {
                debug!("PageRank converged in {} iterations", iteration + 1);
                break;
            }
        }

        debug!("Computed PageRank for {} nodes", n);
        scores
    }
}

impl Default for PageRankEngine {
    fn default() -> Self {
        Self::new(PageRankSettings::default())
    }
}
