use std::collections::{BTreeSet, HashSet};

use crate::app::graph::CategoryGraph;

/// Indices of edges sharing at least one highlighted tag.
pub(super) fn collect_tag_matched_edges(
    graph: &CategoryGraph,
    highlighted: &BTreeSet<String>,
) -> HashSet<usize> {
    graph
        .edges
        .iter()
        .enumerate()
        .filter(|(_, edge)| edge.shared.iter().any(|tag| highlighted.contains(tag)))
        .map(|(index, _)| index)
        .collect()
}
