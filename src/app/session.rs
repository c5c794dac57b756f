use std::collections::BTreeSet;

use eframe::egui::{Pos2, Shape, Vec2};

use super::InteractionState;
use super::graph::{CategoryGraph, GraphFilter, GraphNode, build_category_graph, build_links};
use super::highlight::build_highlight_state;
use super::physics::{ForceSimulation, LayoutSnapshot, SimulationConfig};
use super::render::{FrameInput, Renderer};
use super::viewport::Viewport;
use crate::catalog::Item;
use crate::util::normalize_tag;

/// Owns one graph view: the filtered graph, its simulation, the viewport and the
/// pointer state. Everything here runs on the UI thread.
pub(super) struct GraphSession {
    items: Vec<Item>,
    filter: GraphFilter,
    pub(super) graph: CategoryGraph,
    simulation: ForceSimulation,
    pub(super) layout: LayoutSnapshot,
    pub(super) viewport: Viewport,
    pub(super) interaction: InteractionState,
    renderer: Renderer,
    canvas_size: Vec2,
    pub(super) pixels_per_point: f32,
    /// Last pointer position, in device pixels, while a pan is in progress.
    pub(super) drag_anchor: Option<Pos2>,
}

impl GraphSession {
    pub(super) fn new(items: Vec<Item>, filter: GraphFilter, config: SimulationConfig) -> Self {
        let mut session = Self {
            items,
            filter,
            graph: CategoryGraph::default(),
            simulation: ForceSimulation::new(config),
            layout: LayoutSnapshot::default(),
            viewport: Viewport::default(),
            interaction: InteractionState::default(),
            renderer: Renderer::default(),
            canvas_size: Vec2::ZERO,
            pixels_per_point: 1.0,
            drag_anchor: None,
        };
        session.rebuild();
        session
    }

    pub(super) fn filter(&self) -> &GraphFilter {
        &self.filter
    }

    pub(super) fn graph(&self) -> &CategoryGraph {
        &self.graph
    }

    /// Rebuilds only when the filter actually changes.
    pub(super) fn set_filter(&mut self, filter: GraphFilter) -> bool {
        let filter = GraphFilter {
            category: filter.category.as_deref().and_then(normalize_tag),
            min_shared: filter.min_shared.max(1),
        };
        if filter == self.filter {
            return false;
        }

        self.filter = filter;
        self.rebuild();
        true
    }

    pub(super) fn set_category(&mut self, category: Option<String>) -> bool {
        self.set_filter(GraphFilter {
            category,
            ..self.filter.clone()
        })
    }

    pub(super) fn set_min_shared(&mut self, min_shared: usize) -> bool {
        self.set_filter(GraphFilter {
            min_shared,
            ..self.filter.clone()
        })
    }

    pub(super) fn rebuild(&mut self) {
        let selected = self.filter.select_items(&self.items);
        let allowed_tags = self.filter.allowed_tags();
        let links = build_links(&selected, self.filter.min_shared, allowed_tags.as_ref());

        self.graph = build_category_graph(selected, &links);
        self.simulation.reset(&self.graph);
        self.layout = self.simulation.snapshot();
        self.viewport.reset(self.canvas_size);
        self.interaction.hovered = None;
        self.drag_anchor = None;

        log::info!(
            "graph rebuilt: {} nodes, {} edges (category {}, min shared {})",
            self.graph.node_count(),
            self.graph.edge_count(),
            self.filter.category.as_deref().unwrap_or("all"),
            self.filter.min_shared
        );
    }

    /// Advances the layout by one step; `false` once it has come to rest.
    pub(super) fn tick(&mut self) -> bool {
        match self.simulation.step() {
            Some(snapshot) => {
                self.layout = snapshot;
                true
            }
            None => false,
        }
    }

    pub(super) fn is_settled(&self) -> bool {
        self.simulation.is_converged()
    }

    pub(super) fn temperature(&self) -> f32 {
        self.layout.temperature
    }

    pub(super) fn layout_step(&self) -> u64 {
        self.layout.step
    }

    /// `canvas_px` is the canvas size in device pixels.
    pub(super) fn resize(&mut self, canvas_px: Vec2, pixels_per_point: f32) {
        if pixels_per_point.is_finite() && pixels_per_point > 0.0 {
            self.pixels_per_point = pixels_per_point;
        }
        if !canvas_px.is_finite() || canvas_px == self.canvas_size {
            return;
        }

        self.canvas_size = canvas_px;
        self.viewport.reset(canvas_px);
        log::debug!("canvas resized to {canvas_px:?}, viewport reset");
    }

    pub(super) fn canvas_size(&self) -> Vec2 {
        self.canvas_size
    }

    pub(super) fn hovered_node(&self) -> Option<&GraphNode> {
        self.interaction
            .hovered
            .and_then(|index| self.graph.nodes.get(index))
    }

    /// Device-pixel position of the hovered node's centre.
    pub(super) fn hovered_screen_position(&self) -> Option<Pos2> {
        let index = self.interaction.hovered?;
        let world = self.layout.positions.get(index)?;
        Some(self.viewport.to_screen(world.to_pos2()))
    }

    pub(super) fn highlighted_tags(&self) -> &BTreeSet<String> {
        &self.interaction.highlighted_tags
    }

    pub(super) fn set_highlighted_tags(&mut self, tags: BTreeSet<String>) {
        self.interaction.highlighted_tags = tags;
    }

    pub(super) fn title_query(&self) -> &str {
        &self.interaction.title_query
    }

    pub(super) fn set_title_query(&mut self, query: impl Into<String>) {
        self.interaction.title_query = query.into();
    }

    /// Shapes for the current frame in canvas device pixels.
    pub(super) fn frame(&self) -> Vec<Shape> {
        let highlight = build_highlight_state(&self.graph, &self.interaction);
        self.renderer.render(&FrameInput {
            graph: &self.graph,
            positions: &self.layout.positions,
            viewport: &self.viewport,
            highlight: &highlight,
            hovered: self.interaction.hovered,
            canvas_size: self.canvas_size,
        })
    }
}
