//! Parallel-edge combination ("simplify")

use petgraph::graph::{Graph, NodeIndex};
use petgraph::EdgeType;
use std::collections::BTreeMap;

/// Merge parallel edges into one edge carrying the summed weight.
///
/// Undirected pairs are keyed unordered. Self-loops are dropped. Vertices
/// keep their indices; surviving edges are ordered by (source, target).
pub fn combine_parallel_edges<N, Ty: EdgeType>(graph: Graph<N, u32, Ty>) -> Graph<N, u32, Ty> {
    let directed = graph.is_directed();
    let (nodes, edges) = graph.into_nodes_edges();

    let mut combined: BTreeMap<(usize, usize), u32> = BTreeMap::new();
    for edge in &edges {
        let (mut a, mut b) = (edge.source().index(), edge.target().index());
        if a == b {
            continue;
        }
        if !directed && a > b {
            std::mem::swap(&mut a, &mut b);
        }
        *combined.entry((a, b)).or_insert(0) += edge.weight;
    }

    let mut simplified = Graph::with_capacity(nodes.len(), combined.len());
    for node in nodes {
        simplified.add_node(node.weight);
    }
    for ((a, b), weight) in combined {
        simplified.add_edge(NodeIndex::new(a), NodeIndex::new(b), weight);
    }
    simplified
}

#[cfg(test)]
mod tests {
    use super::*;
    use petgraph::graph::{DiGraph, UnGraph};

    #[test]
    fn test_directed_pairs_kept_apart() {
        let mut graph: DiGraph<&str, u32> = DiGraph::new();
        let a = graph.add_node("a");
        let b = graph.add_node("b");
        graph.add_edge(a, b, 1);
        graph.add_edge(a, b, 1);
        graph.add_edge(b, a, 1);

        let simplified = combine_parallel_edges(graph);
        assert_eq!(simplified.edge_count(), 2);
        let ab = simplified.find_edge(a, b).unwrap();
        let ba = simplified.find_edge(b, a).unwrap();
        assert_eq!(simplified[ab], 2);
        assert_eq!(simplified[ba], 1);
    }

    #[test]
    fn test_undirected_pairs_merged_across_orientation() {
        let mut graph: UnGraph<&str, u32> = UnGraph::new_undirected();
        let a = graph.add_node("a");
        let b = graph.add_node("b");
        graph.add_edge(a, b, 1);
        graph.add_edge(b, a, 3);

        let simplified = combine_parallel_edges(graph);
        assert_eq!(simplified.edge_count(), 1);
        let edge = simplified.find_edge(b, a).unwrap();
        assert_eq!(simplified[edge], 4);
    }

    #[test]
    fn test_loops_dropped_vertices_kept() {
        let mut graph: DiGraph<&str, u32> = DiGraph::new();
        let a = graph.add_node("a");
        graph.add_node("isolated");
        graph.add_edge(a, a, 1);

        let simplified = combine_parallel_edges(graph);
        assert_eq!(simplified.node_count(), 2);
        assert_eq!(simplified.edge_count(), 0);
        assert_eq!(simplified[NodeIndex::new(1)], "isolated");
    }
}
