use eframe::egui::epaint::CircleShape;
use eframe::egui::{Shape, Stroke};

use super::FrameInput;
use crate::app::render_utils::{
    HOVER_FILL, NODE_OUTLINE, TAG_MATCH_EDGE, TITLE_MATCH_RING, category_color, node_radius,
    weight_band_color,
};

const EDGE_WIDTH: f32 = 1.2;
const MATCHED_EDGE_WIDTH: f32 = 3.0;
const OUTLINE_WIDTH: f32 = 1.0;
const TITLE_RING_GAP: f32 = 5.0;
const TITLE_RING_WIDTH: f32 = 2.5;

pub(super) fn draw_edges(input: &FrameInput<'_>, shapes: &mut Vec<Shape>) {
    let highlight = input.highlight;
    for (index, edge) in input.graph.edges.iter().enumerate() {
        if !highlight.shows_edge(index) {
            continue;
        }

        let (Some(start), Some(end)) = (
            input.positions.get(edge.source),
            input.positions.get(edge.target),
        ) else {
            continue;
        };

        let stroke = if highlight.tag_filter_active {
            Stroke::new(MATCHED_EDGE_WIDTH, TAG_MATCH_EDGE)
        } else {
            Stroke::new(EDGE_WIDTH, weight_band_color(edge.weight))
        };
        shapes.push(Shape::line_segment([start.to_pos2(), end.to_pos2()], stroke));
    }
}

pub(super) fn draw_nodes(input: &FrameInput<'_>, shapes: &mut Vec<Shape>) {
    for (index, (node, position)) in input.graph.nodes.iter().zip(input.positions).enumerate() {
        let fill = if input.hovered == Some(index) {
            HOVER_FILL
        } else {
            category_color(node.primary_category())
        };

        shapes.push(Shape::Circle(CircleShape {
            center: position.to_pos2(),
            radius: node_radius(node.degree),
            fill,
            stroke: Stroke::new(OUTLINE_WIDTH, NODE_OUTLINE),
        }));
    }
}

pub(super) fn draw_title_rings(input: &FrameInput<'_>, shapes: &mut Vec<Shape>) {
    if input.highlight.title_matches.is_empty() {
        return;
    }

    for (index, (node, position)) in input.graph.nodes.iter().zip(input.positions).enumerate() {
        if !input.highlight.title_matches.contains(&index) {
            continue;
        }

        shapes.push(Shape::circle_stroke(
            position.to_pos2(),
            node_radius(node.degree) + TITLE_RING_GAP,
            Stroke::new(TITLE_RING_WIDTH, TITLE_MATCH_RING),
        ));
    }
}
