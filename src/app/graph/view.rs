use eframe::egui::emath::TSTransform;
use eframe::egui::{self, Align2, Color32, FontId, Painter, Pos2, Rect, Sense, Ui, vec2};

use crate::util::short_title;

use super::super::ViewModel;
use super::super::render_utils::UNCATEGORIZED;
use super::{PointerEvent, SessionEvent};

const TOOLTIP_TITLE_CHARS: usize = 80;

fn pointer_events(ui: &Ui, rect: Rect, response: &egui::Response) -> Vec<PointerEvent> {
    let local = |point: Pos2| (point - rect.min).to_pos2();
    let (pointer, press_origin, scroll) = ui.input(|input| {
        (
            input.pointer.latest_pos(),
            input.pointer.press_origin(),
            input.raw_scroll_delta.y,
        )
    });

    let mut events = Vec::new();
    if response.drag_started()
        && let Some(origin) = press_origin
    {
        events.push(PointerEvent::Pressed {
            position: local(origin),
        });
    }

    match pointer {
        Some(point) if response.dragged() || response.hovered() => {
            events.push(PointerEvent::Moved {
                position: local(point),
            });
        }
        _ => events.push(PointerEvent::Left),
    }

    if response.drag_stopped() {
        events.push(PointerEvent::Released);
    }

    if response.hovered() && scroll.abs() > f32::EPSILON {
        // egui reports wheel-up as positive; zoom treats positive as "scroll down"
        events.push(PointerEvent::Wheel {
            position: local(pointer.unwrap_or_else(|| rect.center())),
            delta_y: -scroll,
        });
    }

    if response.clicked()
        && let Some(point) = response.interact_pointer_pos()
    {
        events.push(PointerEvent::Clicked {
            position: local(point),
        });
    }

    events
}

impl ViewModel {
    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let pixels_per_point = ui.ctx().pixels_per_point();
        self.session
            .resize(rect.size() * pixels_per_point, pixels_per_point);

        for event in pointer_events(ui, rect, &response) {
            if let Some(SessionEvent::Activated { link, .. }) = self.session.handle_pointer(event)
                && link != "#"
            {
                ui.ctx().open_url(egui::OpenUrl::new_tab(link));
            }
        }

        let moving = self.live_physics && self.session.tick();
        if moving || response.dragged() {
            ui.ctx().request_repaint();
        }

        if self.session.hovered_node().is_some() {
            ui.output_mut(|output| {
                output.cursor_icon = egui::CursorIcon::PointingHand;
            });
        }

        let painter = ui.painter_at(rect);
        let to_canvas = TSTransform::new(rect.min.to_vec2(), 1.0 / pixels_per_point);
        painter.extend(self.session.frame().into_iter().map(|mut shape| {
            shape.transform(to_canvas);
            shape
        }));

        if self.session.graph().is_empty() {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                "No items match the current filters.",
                FontId::proportional(14.0),
                Color32::from_gray(200),
            );
        }

        self.draw_tooltip(&painter, rect, pixels_per_point);
    }

    fn draw_tooltip(&self, painter: &Painter, rect: Rect, pixels_per_point: f32) {
        let (Some(node), Some(anchor)) = (
            self.session.hovered_node(),
            self.session.hovered_screen_position(),
        ) else {
            return;
        };

        let categories = if node.categories.is_empty() {
            UNCATEGORIZED.to_owned()
        } else {
            node.categories.join(", ")
        };
        let text = format!("{}\n{categories}", short_title(&node.title, TOOLTIP_TITLE_CHARS));
        let galley = painter.layout_no_wrap(text, FontId::proportional(13.0), Color32::from_gray(240));

        let mut position = rect.min + anchor.to_vec2() / pixels_per_point + vec2(14.0, -10.0);
        if position.x + galley.size().x > rect.right() - 8.0 {
            position.x = (rect.right() - 8.0 - galley.size().x).max(rect.left());
        }
        let frame = Rect::from_min_size(position, galley.size()).expand(6.0);
        painter.rect_filled(frame, 4.0, Color32::from_rgba_unmultiplied(15, 18, 24, 230));
        painter.galley(position, galley, Color32::from_gray(240));
    }
}
