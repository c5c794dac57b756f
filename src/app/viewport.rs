use eframe::egui::emath::TSTransform;
use eframe::egui::{Pos2, Vec2};

const DEFAULT_SCALE: f32 = 0.85;
const MIN_SCALE: f32 = 0.02;
const MAX_SCALE: f32 = 40.0;
const WHEEL_ZOOM_RATE: f32 = 0.001;

/// Affine world → screen mapping, `screen = world * scale + offset`, in device pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) struct Viewport {
    offset: Vec2,
    scale: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            scale: DEFAULT_SCALE,
        }
    }
}

/// Exponential so that one wheel notch zooms the same on every device.
pub(super) fn wheel_zoom_factor(delta_y: f32) -> f32 {
    (-delta_y * WHEEL_ZOOM_RATE).exp()
}

impl Viewport {
    pub(super) fn centered(canvas_size: Vec2) -> Self {
        Self {
            offset: canvas_size * 0.5,
            scale: DEFAULT_SCALE,
        }
    }

    pub(super) fn offset(&self) -> Vec2 {
        self.offset
    }

    pub(super) fn scale(&self) -> f32 {
        self.scale
    }

    pub(super) fn reset(&mut self, canvas_size: Vec2) {
        *self = Self::centered(canvas_size);
    }

    pub(super) fn pan(&mut self, delta: Vec2) {
        if delta.is_finite() {
            self.offset += delta;
        }
    }

    /// Scales by `factor` keeping the world point under `anchor` fixed on screen.
    pub(super) fn zoom_at(&mut self, anchor: Pos2, factor: f32) {
        if !factor.is_finite() || factor <= 0.0 || !anchor.is_finite() {
            return;
        }

        let world = self.to_world(anchor);
        self.scale = (self.scale * factor).clamp(MIN_SCALE, MAX_SCALE);
        self.offset = anchor.to_vec2() - world.to_vec2() * self.scale;
    }

    pub(super) fn to_world(&self, screen: Pos2) -> Pos2 {
        ((screen.to_vec2() - self.offset) / self.scale).to_pos2()
    }

    pub(super) fn to_screen(&self, world: Pos2) -> Pos2 {
        (world.to_vec2() * self.scale + self.offset).to_pos2()
    }

    pub(super) fn transform(&self) -> TSTransform {
        TSTransform::new(self.offset, self.scale)
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::{pos2, vec2};

    use super::*;

    fn assert_close(a: Pos2, b: Pos2) {
        let tolerance = 1e-3 * (1.0 + a.x.abs().max(a.y.abs()));
        assert!((a - b).length() <= tolerance, "{a:?} != {b:?}");
    }

    fn sample_viewports() -> Vec<Viewport> {
        let mut zoomed = Viewport::centered(vec2(1600.0, 900.0));
        zoomed.zoom_at(pos2(200.0, 120.0), 3.7);
        zoomed.pan(vec2(-41.5, 12.25));

        vec![
            Viewport::default(),
            Viewport::centered(vec2(800.0, 600.0)),
            zoomed,
            Viewport {
                offset: vec2(-3_000.0, 1_250.5),
                scale: 0.031,
            },
        ]
    }

    #[test]
    fn centered_viewport_maps_origin_to_canvas_center() {
        let viewport = Viewport::centered(vec2(800.0, 600.0));
        assert_close(viewport.to_screen(Pos2::ZERO), pos2(400.0, 300.0));
        assert_eq!(viewport.scale(), DEFAULT_SCALE);
    }

    #[test]
    fn screen_world_round_trip() {
        let points = [pos2(0.0, 0.0), pos2(400.0, 300.0), pos2(-25.0, 1_999.5), pos2(1.5, -0.25)];
        for viewport in sample_viewports() {
            for point in points {
                assert_close(viewport.to_screen(viewport.to_world(point)), point);
            }
        }
    }

    #[test]
    fn zoom_keeps_anchor_fixed() {
        let anchors = [pos2(0.0, 0.0), pos2(640.0, 360.0), pos2(13.0, 999.0)];
        for factors in [[1.25, 0.5], [wheel_zoom_factor(-120.0), wheel_zoom_factor(240.0)]] {
            for anchor in anchors {
                let mut viewport = Viewport::centered(vec2(1280.0, 720.0));
                for factor in factors {
                    let world_before = viewport.to_world(anchor);
                    viewport.zoom_at(anchor, factor);
                    assert_close(viewport.to_screen(world_before), anchor);
                }
            }
        }
    }

    #[test]
    fn zoom_keeps_anchor_fixed_when_scale_clamps() {
        let anchor = pos2(300.0, 200.0);
        let mut viewport = Viewport::centered(vec2(800.0, 600.0));
        let world_before = viewport.to_world(anchor);

        viewport.zoom_at(anchor, 1.0e6);
        assert_eq!(viewport.scale(), MAX_SCALE);
        assert_close(viewport.to_screen(world_before), anchor);
    }

    #[test]
    fn invalid_zoom_factors_are_ignored() {
        let mut viewport = Viewport::centered(vec2(800.0, 600.0));
        let before = viewport;
        viewport.zoom_at(pos2(10.0, 10.0), 0.0);
        viewport.zoom_at(pos2(10.0, 10.0), -2.0);
        viewport.zoom_at(pos2(10.0, 10.0), f32::NAN);
        assert_eq!(viewport, before);
        assert!(viewport.scale() > 0.0);
    }

    #[test]
    fn wheel_zoom_is_exponential() {
        assert_eq!(wheel_zoom_factor(0.0), 1.0);
        assert!(wheel_zoom_factor(-100.0) > 1.0);
        assert!(wheel_zoom_factor(100.0) < 1.0);
        let combined = wheel_zoom_factor(50.0) * wheel_zoom_factor(50.0);
        assert!((combined - wheel_zoom_factor(100.0)).abs() < 1e-6);
    }

    #[test]
    fn pan_moves_offset() {
        let mut viewport = Viewport::centered(vec2(800.0, 600.0));
        viewport.pan(vec2(15.0, -5.0));
        assert_close(viewport.offset().to_pos2(), pos2(415.0, 295.0));
    }

    #[test]
    fn transform_matches_to_screen() {
        for viewport in sample_viewports() {
            let world = pos2(12.0, -48.0);
            assert_close(viewport.transform() * world, viewport.to_screen(world));
        }
    }
}
