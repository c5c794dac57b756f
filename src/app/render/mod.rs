use eframe::egui::{Pos2, Rect, Shape, Vec2};

mod passes;

use super::graph::CategoryGraph;
use super::highlight::HighlightState;
use super::render_utils::BACKGROUND;
use super::viewport::Viewport;

/// Ordered drawing stages; each stage only ever paints on top of the previous ones.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum RenderPass {
    /// Edges, then node disks.
    Base,
    /// Rings around nodes whose title matches the search box.
    TitleMatches,
}

/// Everything one frame needs; positions are world coordinates indexed like `graph.nodes`.
pub(super) struct FrameInput<'a> {
    pub(super) graph: &'a CategoryGraph,
    pub(super) positions: &'a [Vec2],
    pub(super) viewport: &'a Viewport,
    pub(super) highlight: &'a HighlightState,
    pub(super) hovered: Option<usize>,
    pub(super) canvas_size: Vec2,
}

pub(super) struct Renderer {
    passes: Vec<RenderPass>,
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            passes: vec![RenderPass::Base, RenderPass::TitleMatches],
        }
    }
}

impl Renderer {
    /// Shapes in canvas device pixels, origin at the canvas top-left.
    pub(super) fn render(&self, input: &FrameInput<'_>) -> Vec<Shape> {
        let mut shapes = vec![Shape::rect_filled(
            Rect::from_min_size(Pos2::ZERO, input.canvas_size),
            0.0,
            BACKGROUND,
        )];

        let transform = input.viewport.transform();
        for pass in &self.passes {
            let first_world_shape = shapes.len();
            match pass {
                RenderPass::Base => {
                    passes::draw_edges(input, &mut shapes);
                    passes::draw_nodes(input, &mut shapes);
                }
                RenderPass::TitleMatches => passes::draw_title_rings(input, &mut shapes),
            }
            for shape in &mut shapes[first_world_shape..] {
                shape.transform(transform);
            }
        }

        shapes
    }
}
