use std::collections::HashSet;

use crate::app::graph::CategoryGraph;

pub(super) fn collect_title_matches(graph: &CategoryGraph, query: &str) -> HashSet<usize> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return HashSet::new();
    }

    graph
        .nodes
        .iter()
        .enumerate()
        .filter(|(_, node)| node.title.to_lowercase().contains(&query))
        .map(|(index, _)| index)
        .collect()
}
