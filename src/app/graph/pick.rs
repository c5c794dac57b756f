use eframe::egui::{Pos2, Vec2};

use super::super::render_utils::node_radius;
use super::CategoryGraph;

/// First node, in insertion order, whose drawn disk contains `world`.
pub(in crate::app) fn pick(world: Pos2, graph: &CategoryGraph, positions: &[Vec2]) -> Option<usize> {
    graph
        .nodes
        .iter()
        .zip(positions)
        .position(|(node, position)| {
            let radius = node_radius(node.degree);
            (world - position.to_pos2()).length_sq() <= radius * radius
        })
}

#[cfg(test)]
mod tests {
    use eframe::egui::{pos2, vec2};

    use super::super::{build_category_graph, build_links};
    use super::*;
    use crate::catalog::Item;

    fn graph_of(tags: &[&[&str]]) -> CategoryGraph {
        let items = tags
            .iter()
            .enumerate()
            .map(|(index, categories)| Item {
                id: format!("n{index}"),
                title: format!("Node {index}"),
                link: "#".to_owned(),
                categories: categories.iter().map(|tag| (*tag).to_owned()).collect(),
            })
            .collect::<Vec<_>>();
        let links = build_links(&items, 1, None);
        build_category_graph(items, &links)
    }

    #[test]
    fn empty_graph_picks_nothing() {
        assert_eq!(pick(pos2(0.0, 0.0), &CategoryGraph::default(), &[]), None);
    }

    #[test]
    fn picks_node_under_point() {
        let graph = graph_of(&[&["x"], &["y"]]);
        let positions = [vec2(0.0, 0.0), vec2(100.0, 0.0)];

        assert_eq!(pick(pos2(95.0, 4.0), &graph, &positions), Some(1));
        assert_eq!(pick(pos2(50.0, 0.0), &graph, &positions), None);
    }

    #[test]
    fn overlapping_disks_resolve_to_first_inserted() {
        let graph = graph_of(&[&["x"], &["x"], &["x"]]);
        let positions = [vec2(0.0, 0.0), vec2(4.0, 0.0), vec2(8.0, 0.0)];

        let first = pick(pos2(4.0, 0.0), &graph, &positions);
        assert_eq!(first, Some(0));
        for _ in 0..8 {
            assert_eq!(pick(pos2(4.0, 0.0), &graph, &positions), first);
        }
    }

    #[test]
    fn pick_radius_grows_with_degree() {
        // the three "x" nodes have degree 2 (radius 13), the "y" node degree 0 (radius 10)
        let graph = graph_of(&[&["x"], &["x"], &["x"], &["y"]]);
        let far = 1_000.0;
        let positions = [vec2(0.0, 0.0), vec2(far, 0.0), vec2(0.0, far), vec2(far, far)];

        assert_eq!(pick(pos2(12.5, 0.0), &graph, &positions), Some(0));
        assert_eq!(pick(pos2(13.5, 0.0), &graph, &positions), None);
        assert_eq!(pick(pos2(far + 9.5, far), &graph, &positions), Some(3));
        assert_eq!(pick(pos2(far + 10.5, far), &graph, &positions), None);
    }
}
