use std::collections::BTreeSet;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Context};

use crate::catalog::{Catalog, load_catalog};

mod graph;
mod highlight;
mod physics;
mod render;
mod render_utils;
mod session;
mod ui;
mod viewport;

use session::GraphSession;

pub use graph::GraphFilter;

pub struct TagweaveApp {
    data_path: String,
    initial_filter: GraphFilter,
    state: AppState,
}

enum AppState {
    Loading {
        rx: Receiver<Result<Catalog, String>>,
    },
    Ready(Box<ViewModel>),
    Error(String),
}

struct ViewModel {
    categories: Vec<String>,
    item_count: usize,
    session: GraphSession,
    tag_search: String,
    live_physics: bool,
}

/// Ephemeral per-session interaction state; never persisted.
#[derive(Clone, Debug, Default)]
struct InteractionState {
    hovered: Option<usize>,
    highlighted_tags: BTreeSet<String>,
    title_query: String,
}

impl TagweaveApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, data_path: String, filter: GraphFilter) -> Self {
        let state = Self::start_load(data_path.clone());
        Self {
            data_path,
            initial_filter: filter,
            state,
        }
    }

    fn spawn_load(data_path: String) -> Receiver<Result<Catalog, String>> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = load_catalog(&data_path).map_err(|error| format!("{error:#}"));
            let _ = tx.send(result);
        });

        rx
    }

    fn start_load(data_path: String) -> AppState {
        AppState::Loading {
            rx: Self::spawn_load(data_path),
        }
    }
}

impl eframe::App for TagweaveApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                match rx.try_recv() {
                    Ok(Ok(catalog)) => {
                        transition = Some(AppState::Ready(Box::new(ViewModel::new(
                            catalog,
                            self.initial_filter.clone(),
                        ))));
                    }
                    Ok(Err(error)) => {
                        log::warn!("item list load failed: {error}");
                        transition = Some(AppState::Error(error));
                    }
                    Err(TryRecvError::Empty) => ctx.request_repaint(),
                    Err(TryRecvError::Disconnected) => {
                        transition = Some(AppState::Error(
                            "Background load worker disconnected".to_owned(),
                        ));
                    }
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading item list...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Could not load the item list");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.label(format!("data file: {}", self.data_path));
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        transition = Some(Self::start_load(self.data_path.clone()));
                    }
                });
            }
            AppState::Ready(model) => model.show(ctx, &self.data_path),
        }

        if let Some(next_state) = transition {
            self.state = next_state;
        }
    }
}
