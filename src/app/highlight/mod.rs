use std::collections::HashSet;

mod tags;
mod title;

use self::tags::collect_tag_matched_edges;
use self::title::collect_title_matches;
use super::InteractionState;
use super::graph::CategoryGraph;

/// What the renderer emphasises this frame, derived from the interaction state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(super) struct HighlightState {
    /// Set while at least one tag is highlighted; unmatched edges are then hidden.
    pub(super) tag_filter_active: bool,
    pub(super) matched_edges: HashSet<usize>,
    pub(super) title_matches: HashSet<usize>,
}

pub(super) fn build_highlight_state(
    graph: &CategoryGraph,
    interaction: &InteractionState,
) -> HighlightState {
    let tag_filter_active = !interaction.highlighted_tags.is_empty();
    let matched_edges = if tag_filter_active {
        collect_tag_matched_edges(graph, &interaction.highlighted_tags)
    } else {
        HashSet::new()
    };

    HighlightState {
        tag_filter_active,
        matched_edges,
        title_matches: collect_title_matches(graph, &interaction.title_query),
    }
}

impl HighlightState {
    pub(super) fn shows_edge(&self, edge_index: usize) -> bool {
        !self.tag_filter_active || self.matched_edges.contains(&edge_index)
    }
}
