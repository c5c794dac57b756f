use eframe::egui::Pos2;

use super::super::session::GraphSession;
use super::super::viewport::wheel_zoom_factor;
use super::pick;

/// Pointer input in logical points relative to the canvas top-left.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(in crate::app) enum PointerEvent {
    Pressed { position: Pos2 },
    Moved { position: Pos2 },
    Released,
    /// `delta_y > 0` scrolls down, which zooms out.
    Wheel { position: Pos2, delta_y: f32 },
    Clicked { position: Pos2 },
    Left,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(in crate::app) enum SessionEvent {
    Activated { id: String, link: String },
}

impl GraphSession {
    pub(in crate::app) fn handle_pointer(&mut self, event: PointerEvent) -> Option<SessionEvent> {
        match event {
            PointerEvent::Pressed { position } => {
                self.drag_anchor = Some(self.to_device(position));
                None
            }
            PointerEvent::Moved { position } => {
                let device = self.to_device(position);
                match self.drag_anchor {
                    Some(anchor) => {
                        self.viewport.pan(device - anchor);
                        self.drag_anchor = Some(device);
                    }
                    None => self.interaction.hovered = self.node_at(device),
                }
                None
            }
            PointerEvent::Released => {
                self.drag_anchor = None;
                None
            }
            PointerEvent::Wheel { position, delta_y } => {
                let device = self.to_device(position);
                self.viewport.zoom_at(device, wheel_zoom_factor(delta_y));
                None
            }
            PointerEvent::Clicked { position } => {
                let index = self.node_at(self.to_device(position))?;
                let node = &self.graph.nodes[index];
                log::debug!("activated node {}", node.id);
                Some(SessionEvent::Activated {
                    id: node.id.clone(),
                    link: node.link.clone(),
                })
            }
            PointerEvent::Left => {
                self.interaction.hovered = None;
                self.drag_anchor = None;
                None
            }
        }
    }

    fn to_device(&self, point: Pos2) -> Pos2 {
        (point.to_vec2() * self.pixels_per_point).to_pos2()
    }

    fn node_at(&self, device: Pos2) -> Option<usize> {
        pick(self.viewport.to_world(device), &self.graph, &self.layout.positions)
    }
}
