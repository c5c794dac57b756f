mod forces;
mod quadtree;

use std::collections::HashMap;
use std::sync::Arc;

use eframe::egui::{Vec2, vec2};

use super::graph::CategoryGraph;
use super::render_utils::collision_radius;
use crate::util::stable_pair;
use forces::{
    ChargeParams, CollisionParams, Spring, accumulate_charge, accumulate_collisions,
    apply_springs, pull_to_center,
};
use quadtree::QuadCell;

const SEED_SPACING: f32 = 10.0;
const SEED_JITTER: f32 = 2.0;

#[derive(Clone, Copy, Debug)]
pub(in crate::app) struct SimulationConfig {
    /// Temperature is multiplied by this every step.
    pub(in crate::app) alpha_decay: f32,
    pub(in crate::app) alpha_min: f32,
    pub(in crate::app) charge_strength: f32,
    pub(in crate::app) theta: f32,
    pub(in crate::app) link_strength: f32,
    pub(in crate::app) link_base_length: f32,
    pub(in crate::app) link_length_per_weight: f32,
    pub(in crate::app) collision_iterations: usize,
    pub(in crate::app) collision_strength: f32,
    pub(in crate::app) center_strength: f32,
    /// Fraction of velocity lost per step.
    pub(in crate::app) velocity_decay: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            alpha_decay: 0.98,
            alpha_min: 0.001,
            charge_strength: 240.0,
            theta: 0.9,
            link_strength: 0.05,
            link_base_length: 160.0,
            link_length_per_weight: 40.0,
            collision_iterations: 2,
            collision_strength: 1.0,
            center_strength: 1.0,
            velocity_decay: 0.4,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) struct Body {
    pub(super) position: Vec2,
    pub(super) velocity: Vec2,
}

impl Body {
    fn seeded(index: usize, id: &str) -> Self {
        let angle = index as f32 * std::f32::consts::PI * (3.0 - 5.0_f32.sqrt());
        let radius = SEED_SPACING * (index as f32 + 0.5).sqrt();
        let (jitter_x, jitter_y) = stable_pair(id);
        Self {
            position: vec2(angle.cos(), angle.sin()) * radius
                + vec2(jitter_x, jitter_y) * SEED_JITTER,
            velocity: Vec2::ZERO,
        }
    }

    pub(super) fn predicted(&self) -> Vec2 {
        self.position + self.velocity
    }
}

/// Immutable copy of the layout handed to the renderer and the hit tester.
#[derive(Clone, Debug)]
pub(in crate::app) struct LayoutSnapshot {
    pub(in crate::app) positions: Arc<[Vec2]>,
    pub(in crate::app) temperature: f32,
    pub(in crate::app) step: u64,
}

impl Default for LayoutSnapshot {
    fn default() -> Self {
        Self {
            positions: Arc::from(Vec::new()),
            temperature: 0.0,
            step: 0,
        }
    }
}

#[derive(Default)]
struct Scratch {
    positions: Vec<Vec2>,
    predicted: Vec<Vec2>,
    deltas: Vec<Vec2>,
}

pub(in crate::app) struct ForceSimulation {
    config: SimulationConfig,
    ids: Vec<String>,
    bodies: Vec<Body>,
    radii: Vec<f32>,
    springs: Vec<Spring>,
    temperature: f32,
    step_count: u64,
    scratch: Scratch,
}

impl ForceSimulation {
    pub(in crate::app) fn new(config: SimulationConfig) -> Self {
        Self {
            config,
            ids: Vec::new(),
            bodies: Vec::new(),
            radii: Vec::new(),
            springs: Vec::new(),
            temperature: 0.0,
            step_count: 0,
            scratch: Scratch::default(),
        }
    }

    /// Takes over the node set of `graph`. Bodies whose id is still present keep
    /// their position and velocity.
    pub(in crate::app) fn reset(&mut self, graph: &CategoryGraph) {
        let mut previous = self
            .ids
            .drain(..)
            .zip(self.bodies.drain(..))
            .collect::<HashMap<_, _>>();

        let mut kept = 0usize;
        for (index, node) in graph.nodes.iter().enumerate() {
            let body = match previous.remove(&node.id) {
                Some(body) => {
                    kept += 1;
                    body
                }
                None => Body::seeded(index, &node.id),
            };
            self.ids.push(node.id.clone());
            self.bodies.push(body);
        }

        self.radii.clear();
        self.radii
            .extend(graph.nodes.iter().map(|node| collision_radius(node.degree)));

        self.springs.clear();
        self.springs.extend(graph.edges.iter().map(|edge| {
            let source_degree = graph.nodes[edge.source].degree as f32;
            let target_degree = graph.nodes[edge.target].degree as f32;
            Spring {
                source: edge.source,
                target: edge.target,
                rest_length: self.config.link_base_length
                    + self.config.link_length_per_weight * edge.weight as f32,
                bias: source_degree / (source_degree + target_degree).max(1.0),
            }
        }));

        self.temperature = 1.0;
        self.step_count = 0;
        log::debug!(
            "simulation reset: {} bodies ({kept} kept), {} springs",
            self.bodies.len(),
            self.springs.len()
        );
    }

    pub(in crate::app) fn is_converged(&self) -> bool {
        self.temperature < self.config.alpha_min
    }

    pub(in crate::app) fn snapshot(&self) -> LayoutSnapshot {
        LayoutSnapshot {
            positions: self.bodies.iter().map(|body| body.position).collect(),
            temperature: self.temperature,
            step: self.step_count,
        }
    }

    /// Advances one step. Returns `None` once converged, without touching any body.
    pub(in crate::app) fn step(&mut self) -> Option<LayoutSnapshot> {
        if self.is_converged() {
            return None;
        }

        self.temperature *= self.config.alpha_decay;
        self.step_count += 1;

        if self.bodies.len() < 2 {
            for body in &mut self.bodies {
                body.position = Vec2::ZERO;
                body.velocity = Vec2::ZERO;
            }
            self.temperature = 0.0;
            return Some(self.snapshot());
        }

        let temperature = self.temperature;
        self.apply_charge(temperature);
        apply_springs(
            &mut self.bodies,
            &self.springs,
            self.config.link_strength * temperature,
        );
        for _ in 0..self.config.collision_iterations {
            self.apply_collisions(temperature);
        }

        let keep = 1.0 - self.config.velocity_decay.clamp(0.0, 1.0);
        for (index, body) in self.bodies.iter_mut().enumerate() {
            body.velocity *= keep;
            body.position += body.velocity;
            if !body.position.is_finite() || !body.velocity.is_finite() {
                log::warn!("body {index} left the finite plane, reseeding");
                *body = Body::seeded(index, &self.ids[index]);
            }
        }
        pull_to_center(&mut self.bodies, self.config.center_strength * temperature);

        if self.is_converged() {
            log::debug!("layout converged after {} steps", self.step_count);
        }
        Some(self.snapshot())
    }

    fn apply_charge(&mut self, temperature: f32) {
        let positions = &mut self.scratch.positions;
        positions.clear();
        positions.extend(self.bodies.iter().map(|body| body.position));

        let Some(root) = QuadCell::build(positions) else {
            return;
        };
        let params = ChargeParams {
            strength: self.config.charge_strength * temperature,
            min_distance_sq: 1.0,
            theta: self.config.theta,
        };
        for (index, body) in self.bodies.iter_mut().enumerate() {
            let mut delta = Vec2::ZERO;
            accumulate_charge(&root, index, positions, params, &mut delta);
            body.velocity += delta;
        }
    }

    fn apply_collisions(&mut self, temperature: f32) {
        let predicted = &mut self.scratch.predicted;
        predicted.clear();
        predicted.extend(self.bodies.iter().map(Body::predicted));

        let deltas = &mut self.scratch.deltas;
        deltas.clear();
        deltas.resize(self.bodies.len(), Vec2::ZERO);

        let Some(root) = QuadCell::build(predicted) else {
            return;
        };
        let max_radius = self.radii.iter().copied().fold(0.0_f32, f32::max);
        let reach = max_radius * 2.0;
        accumulate_collisions(
            &root,
            &root,
            true,
            predicted,
            &self.radii,
            CollisionParams {
                strength: self.config.collision_strength * temperature,
                max_gap_sq: reach * reach,
            },
            deltas,
        );

        for (body, delta) in self.bodies.iter_mut().zip(deltas.iter()) {
            body.velocity += *delta;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::graph::{build_category_graph, build_links};
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

    fn run_to_rest(simulation: &mut ForceSimulation) -> usize {
        let mut steps = 0;
        while simulation.step().is_some() {
            steps += 1;
            assert!(steps < 10_000, "simulation never converged");
        }
        steps
    }

    #[test]
    fn single_node_converges_at_origin_in_one_step() {
        let mut simulation = ForceSimulation::new(SimulationConfig::default());
        simulation.reset(&graph_of(&[&["x"]]));

        let snapshot = simulation.step().expect("first step runs");
        assert_eq!(snapshot.positions.len(), 1);
        assert_eq!(snapshot.positions[0], Vec2::ZERO);
        assert!(simulation.is_converged());
        assert!(simulation.step().is_none());
    }

    #[test]
    fn empty_graph_converges_immediately() {
        let mut simulation = ForceSimulation::new(SimulationConfig::default());
        simulation.reset(&CategoryGraph::default());
        assert!(simulation.step().is_some_and(|snapshot| snapshot.positions.is_empty()));
        assert!(simulation.step().is_none());
    }

    #[test]
    fn temperature_schedule_reaches_rest() {
        let mut simulation = ForceSimulation::new(SimulationConfig::default());
        simulation.reset(&graph_of(&[&["x", "y"], &["x"], &["y"], &["z"]]));
        assert_eq!(simulation.snapshot().temperature, 1.0);

        let steps = run_to_rest(&mut simulation);
        // 0.98^342 is the first power below 0.001
        assert_eq!(steps, 342);
        assert!(simulation.is_converged());

        let frozen = simulation.snapshot();
        assert!(simulation.step().is_none());
        assert_eq!(simulation.snapshot().positions, frozen.positions);
    }

    #[test]
    fn coincident_bodies_are_pushed_apart() {
        let mut simulation = ForceSimulation::new(SimulationConfig::default());
        simulation.reset(&graph_of(&[&["x"], &["y"]]));
        for body in &mut simulation.bodies {
            body.position = vec2(3.0, 3.0);
        }

        run_to_rest(&mut simulation);
        let positions = simulation.snapshot().positions;
        assert!((positions[0] - positions[1]).length() > 20.0);
    }

    #[test]
    fn positions_stay_finite_and_centered() {
        let tags: Vec<&[&str]> = vec![
            &["bone", "mice"],
            &["bone"],
            &["mice", "microgravity"],
            &["microgravity"],
            &["plants"],
            &["plants", "bone"],
            &[],
            &["mice"],
        ];
        let mut simulation = ForceSimulation::new(SimulationConfig::default());
        simulation.reset(&graph_of(&tags));
        run_to_rest(&mut simulation);

        let positions = simulation.snapshot().positions;
        assert!(positions.iter().all(|position| position.is_finite()));
        let centroid = positions.iter().fold(Vec2::ZERO, |sum, p| sum + *p) / positions.len() as f32;
        assert!(centroid.length() < 5.0, "centroid drifted to {centroid:?}");
    }

    #[test]
    fn reset_keeps_surviving_bodies() {
        let mut simulation = ForceSimulation::new(SimulationConfig::default());
        simulation.reset(&graph_of(&[&["x"], &["x"], &["y"]]));
        for _ in 0..25 {
            simulation.step();
        }
        let before = simulation.snapshot().positions;

        // n0..n2 keep their ids, n3 is new
        simulation.reset(&graph_of(&[&["x"], &["x"], &["x"], &["x"]]));
        let after = simulation.snapshot().positions;

        assert_eq!(simulation.snapshot().temperature, 1.0);
        assert_eq!(after.len(), 4);
        assert_eq!(after[0], before[0]);
        assert_eq!(after[1], before[1]);
        assert_eq!(after[3], Body::seeded(3, "n3").position);
    }

    #[test]
    fn seeding_is_deterministic() {
        let mut first = ForceSimulation::new(SimulationConfig::default());
        let mut second = ForceSimulation::new(SimulationConfig::default());
        let graph = graph_of(&[&["a"], &["a", "b"], &["b"]]);
        first.reset(&graph);
        second.reset(&graph);
        for _ in 0..40 {
            first.step();
            second.step();
        }
        assert_eq!(first.snapshot().positions, second.snapshot().positions);
    }
}
