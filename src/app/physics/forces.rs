use eframe::egui::{Vec2, vec2};

use super::Body;
use super::quadtree::QuadCell;

const COINCIDENT_SQ: f32 = 1.0e-12;

/// Direction pushing `a` away from `b` when both sit on the same spot.
/// Deterministic, and exactly opposite for `(b, a)`.
pub(super) fn separation_direction(a: usize, b: usize) -> Vec2 {
    let (low, high) = (a.min(b), a.max(b));
    let angle = ((low as f32) * 0.618_034 + (high as f32) * 0.414_214 + 0.11) * std::f32::consts::TAU;
    let direction = vec2(angle.cos(), angle.sin());
    if a <= b { direction } else { -direction }
}

#[derive(Clone, Copy)]
pub(super) struct ChargeParams {
    /// Already scaled by the current temperature.
    pub(super) strength: f32,
    pub(super) min_distance_sq: f32,
    pub(super) theta: f32,
}

fn charge_between(delta: Vec2, mass: f32, params: ChargeParams) -> Vec2 {
    delta * (params.strength * mass / delta.length_sq().max(params.min_distance_sq))
}

/// Barnes-Hut walk adding the repulsion felt by body `index` to `velocity_delta`.
pub(super) fn accumulate_charge(
    cell: &QuadCell,
    index: usize,
    positions: &[Vec2],
    params: ChargeParams,
    velocity_delta: &mut Vec2,
) {
    if cell.count == 0 {
        return;
    }

    let point = positions[index];
    if cell.is_leaf() {
        for &other in &cell.bodies {
            if other == index {
                continue;
            }

            let mut delta = point - positions[other];
            if delta.length_sq() <= COINCIDENT_SQ {
                delta = separation_direction(index, other);
            }
            *velocity_delta += charge_between(delta, 1.0, params);
        }
        return;
    }

    let delta = point - cell.center_of_mass;
    let side = cell.square.side();
    let far_enough = !cell.square.contains(point)
        && side * side < params.theta * params.theta * delta.length_sq();
    if far_enough {
        *velocity_delta += charge_between(delta, cell.count as f32, params);
        return;
    }

    for child in cell.children() {
        accumulate_charge(child, index, positions, params, velocity_delta);
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) struct Spring {
    pub(super) source: usize,
    pub(super) target: usize,
    pub(super) rest_length: f32,
    /// Share of the correction taken by the target: `deg(source) / (deg(source) + deg(target))`.
    pub(super) bias: f32,
}

/// Pulls or pushes each linked pair toward its rest length, using predicted positions.
pub(super) fn apply_springs(bodies: &mut [Body], springs: &[Spring], stiffness: f32) {
    let body_count = bodies.len();
    for spring in springs {
        let (source, target) = (spring.source, spring.target);
        if source >= body_count || target >= body_count || source == target {
            continue;
        }

        let mut delta = bodies[target].predicted() - bodies[source].predicted();
        let mut distance = delta.length();
        if distance <= 1.0e-6 {
            delta = separation_direction(target, source) * 1.0e-3;
            distance = 1.0e-3;
        }

        let correction = delta * ((distance - spring.rest_length) / distance * stiffness);
        bodies[target].velocity -= correction * spring.bias;
        bodies[source].velocity += correction * (1.0 - spring.bias);
    }
}

#[derive(Clone, Copy)]
pub(super) struct CollisionParams {
    pub(super) strength: f32,
    pub(super) max_gap_sq: f32,
}

fn collide_pair(
    from: usize,
    to: usize,
    positions: &[Vec2],
    radii: &[f32],
    strength: f32,
    deltas: &mut [Vec2],
) {
    let reach = radii[from] + radii[to];
    let mut delta = positions[from] - positions[to];
    let mut distance_sq = delta.length_sq();
    if distance_sq >= reach * reach {
        return;
    }
    if distance_sq <= COINCIDENT_SQ {
        delta = separation_direction(from, to) * 1.0e-3;
        distance_sq = 1.0e-6;
    }

    let distance = distance_sq.sqrt();
    let push = delta * ((reach - distance) / distance * strength);
    let from_sq = radii[from] * radii[from];
    let to_sq = radii[to] * radii[to];
    let from_share = to_sq / (from_sq + to_sq);

    deltas[from] += push * from_share;
    deltas[to] -= push * (1.0 - from_share);
}

/// Dual-tree walk over every pair of cells close enough for their disks to touch.
pub(super) fn accumulate_collisions(
    cell_a: &QuadCell,
    cell_b: &QuadCell,
    same_cell: bool,
    positions: &[Vec2],
    radii: &[f32],
    params: CollisionParams,
    deltas: &mut [Vec2],
) {
    if cell_a.square.gap_sq(cell_b.square) > params.max_gap_sq {
        return;
    }

    match (cell_a.is_leaf(), cell_b.is_leaf()) {
        (true, true) if same_cell => {
            for (slot, &from) in cell_a.bodies.iter().enumerate() {
                for &to in &cell_a.bodies[slot + 1..] {
                    collide_pair(from, to, positions, radii, params.strength, deltas);
                }
            }
        }
        (true, true) => {
            for &from in &cell_a.bodies {
                for &to in &cell_b.bodies {
                    collide_pair(from, to, positions, radii, params.strength, deltas);
                }
            }
        }
        _ if same_cell => {
            let children = cell_a.children().collect::<Vec<_>>();
            for (slot, first) in children.iter().enumerate() {
                accumulate_collisions(first, first, true, positions, radii, params, deltas);
                for second in &children[slot + 1..] {
                    accumulate_collisions(first, second, false, positions, radii, params, deltas);
                }
            }
        }
        (a_is_leaf, b_is_leaf) => {
            let split_a = !a_is_leaf
                && (b_is_leaf || cell_a.square.half_extent >= cell_b.square.half_extent);
            if split_a {
                for child in cell_a.children() {
                    accumulate_collisions(child, cell_b, false, positions, radii, params, deltas);
                }
            } else {
                for child in cell_b.children() {
                    accumulate_collisions(cell_a, child, false, positions, radii, params, deltas);
                }
            }
        }
    }
}

/// Shifts every body so the centroid moves `strength` of the way to the origin.
pub(super) fn pull_to_center(bodies: &mut [Body], strength: f32) {
    if bodies.is_empty() {
        return;
    }

    let centroid = bodies
        .iter()
        .fold(Vec2::ZERO, |sum, body| sum + body.position)
        / bodies.len() as f32;
    let shift = centroid * strength.clamp(0.0, 1.0);
    for body in bodies {
        body.position -= shift;
    }
}
