use eframe::egui::{self, Align, Context, Layout};

use crate::catalog::Catalog;

use super::super::physics::SimulationConfig;
use super::super::session::GraphSession;
use super::super::{GraphFilter, ViewModel};

impl ViewModel {
    pub(in crate::app) fn new(catalog: Catalog, filter: GraphFilter) -> Self {
        let categories = catalog.categories();
        let item_count = catalog.item_count();
        log::info!(
            "{item_count} items across {} categories ready",
            categories.len()
        );

        Self {
            categories,
            item_count,
            session: GraphSession::new(catalog.items, filter, SimulationConfig::default()),
            tag_search: String::new(),
            live_physics: true,
        }
    }

    pub(in crate::app) fn show(&mut self, ctx: &Context, data_path: &str) {
        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("tagweave");
                    ui.separator();
                    ui.label(format!("data: {data_path}"));
                    ui.label(format!("items: {}", self.item_count));
                    ui.label(format!("nodes: {}", self.session.graph().node_count()));
                    ui.label(format!("edges: {}", self.session.graph().edge_count()));
                    if ui
                        .button("Re-run layout")
                        .on_hover_text("Rebuild the graph and restart the simulation.")
                        .clicked()
                    {
                        self.session.rebuild();
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.label(self.layout_status_text());
                    });
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(300.0)
            .show(ctx, |ui| self.draw_controls(ui));

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| self.draw_graph(ui));
    }

    fn layout_status_text(&self) -> String {
        if self.session.is_settled() {
            "layout settled".to_owned()
        } else {
            format!(
                "step {}  |  temperature {:.3}",
                self.session.layout_step(),
                self.session.temperature()
            )
        }
    }
}
