//! Shared author-vertex setup for the two author graphs

use ahash::AHashMap;
use petgraph::graph::{Graph, NodeIndex};
use petgraph::EdgeType;

use crate::shared::models::ArticleTable;

/// Vertices plus per-article author indexes
pub(crate) struct AuthorVertices<N, Ty: EdgeType> {
    pub graph: Graph<N, u32, Ty>,
    pub author_to_index: AHashMap<String, NodeIndex>,
    /// `per_article[i]` = vertex of each author of article row `i`, list order kept
    pub per_article: Vec<Vec<NodeIndex>>,
}

/// One vertex per distinct author name, in first-appearance order
pub(crate) fn author_vertices<N, Ty: EdgeType>(
    articles: &ArticleTable,
    make_node: impl Fn(&str) -> N,
) -> AuthorVertices<N, Ty> {
    let mut graph = Graph::default();
    let mut author_to_index: AHashMap<String, NodeIndex> = AHashMap::new();
    let mut per_article = Vec::with_capacity(articles.len());

    for article in articles.articles() {
        let indexes = article
            .authors
            .iter()
            .map(|name| match author_to_index.get(name) {
                Some(&index) => index,
                None => {
                    let index = graph.add_node(make_node(name));
                    author_to_index.insert(name.clone(), index);
                    index
                }
            })
            .collect();
        per_article.push(indexes);
    }

    AuthorVertices {
        graph,
        author_to_index,
        per_article,
    }
}
