use std::collections::{HashMap, HashSet};

use crate::catalog::Item;

use super::{CategoryGraph, GraphEdge, GraphNode, Link};

/// Assembles the dense node list and resolves links to node indices.
///
/// Links naming an unknown id, linking a node to itself, or repeating an unordered
/// pair are dropped here so they can never reach the simulation.
pub(in crate::app) fn build_category_graph(items: Vec<Item>, links: &[Link]) -> CategoryGraph {
    let mut index_by_id = HashMap::with_capacity(items.len());
    let mut nodes = Vec::with_capacity(items.len());
    for item in items {
        if index_by_id.contains_key(&item.id) {
            continue;
        }

        index_by_id.insert(item.id.clone(), nodes.len());
        nodes.push(GraphNode {
            id: item.id,
            title: item.title,
            link: item.link,
            categories: item.categories,
            degree: 0,
        });
    }

    let mut seen_pairs = HashSet::with_capacity(links.len());
    let mut edges = Vec::with_capacity(links.len());
    let mut dropped = 0usize;
    for link in links {
        let (Some(&source), Some(&target)) =
            (index_by_id.get(&link.source), index_by_id.get(&link.target))
        else {
            dropped += 1;
            continue;
        };

        if source == target || !seen_pairs.insert((source.min(target), source.max(target))) {
            dropped += 1;
            continue;
        }

        nodes[source].degree += 1;
        nodes[target].degree += 1;
        edges.push(GraphEdge {
            source,
            target,
            weight: link.weight,
            shared: link.shared.clone(),
        });
    }

    if dropped > 0 {
        log::debug!("dropped {dropped} malformed links while building the graph");
    }

    CategoryGraph {
        nodes,
        edges,
        index_by_id,
    }
}

#[cfg(test)]
mod tests {
    use super::super::{GraphFilter, build_links};
    use super::*;

    fn item(id: &str, categories: &[&str]) -> Item {
        Item {
            id: id.to_owned(),
            title: format!("Article {id}"),
            link: format!("https://example.com/{id}"),
            categories: categories.iter().map(|tag| (*tag).to_owned()).collect(),
        }
    }

    fn link(source: &str, target: &str) -> Link {
        Link {
            source: source.to_owned(),
            target: target.to_owned(),
            weight: 1,
            shared: vec!["x".to_owned()],
        }
    }

    fn abc() -> Vec<Item> {
        vec![
            item("A", &["x", "y"]),
            item("B", &["y", "z"]),
            item("C", &["z"]),
        ]
    }

    #[test]
    fn degrees_count_incident_edges() {
        let items = abc();
        let links = build_links(&items, 1, None);
        let graph = build_category_graph(items, &links);

        let degrees = graph.nodes.iter().map(|node| node.degree).collect::<Vec<_>>();
        assert_eq!(degrees, vec![1, 2, 1]);
        assert_eq!(graph.edges[0].source, 0);
        assert_eq!(graph.edges[0].target, 1);
    }

    #[test]
    fn malformed_links_are_dropped() {
        let links = vec![
            link("A", "missing"),
            link("A", "A"),
            link("A", "B"),
            link("B", "A"),
        ];
        let graph = build_category_graph(abc(), &links);

        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.nodes[0].degree, 1);
        assert_eq!(graph.nodes[2].degree, 0);
    }

    #[test]
    fn category_filter_limits_nodes_and_shared_tags() {
        let filter = GraphFilter {
            category: Some("y".to_owned()),
            min_shared: 1,
        };
        let items = filter.select_items(&abc());
        let allowed = filter.allowed_tags();
        let links = build_links(&items, filter.min_shared, allowed.as_ref());
        let graph = build_category_graph(items, &links);

        let ids = graph.nodes.iter().map(|node| node.id.as_str()).collect::<Vec<_>>();
        assert_eq!(ids, vec!["A", "B"]);
        assert!(graph.nodes.iter().all(|node| node.categories.iter().any(|tag| tag == "y")));

        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.edges[0].shared, vec!["y"]);
        assert!(graph.edges.iter().all(|edge| edge.shared.iter().all(|tag| tag == "y")));
    }

    #[test]
    fn empty_items_build_an_empty_graph() {
        let graph = build_category_graph(Vec::new(), &[link("A", "B")]);
        assert!(graph.is_empty());
        assert_eq!(graph.edge_count(), 0);
    }
}
