use eframe::egui::{self, Ui};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use super::super::ViewModel;

const ALL_CATEGORIES: &str = "All categories";
const MAX_MIN_SHARED: usize = 5;

/// Tags matching `query`, best fuzzy score first; every tag when the query is blank.
fn matching_tags<'a>(matcher: &SkimMatcherV2, tags: &'a [String], query: &str) -> Vec<&'a String> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return tags.iter().collect();
    }

    let mut scored = tags
        .iter()
        .filter_map(|tag| matcher.fuzzy_match(tag, &query).map(|score| (score, tag)))
        .collect::<Vec<_>>();
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().map(|(_, tag)| tag).collect()
}

impl ViewModel {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.heading("Graph Controls");
        ui.separator();
        ui.add_space(4.0);

        let mut min_shared = self.session.filter().min_shared;
        let threshold_slider = ui
            .add(egui::Slider::new(&mut min_shared, 1..=MAX_MIN_SHARED).text("Min shared tags"))
            .on_hover_text("Only link items sharing at least this many tags.");
        if threshold_slider.changed() {
            self.session.set_min_shared(min_shared);
        }

        let mut category = self.session.filter().category.clone();
        egui::ComboBox::from_label("Category")
            .selected_text(category.as_deref().unwrap_or(ALL_CATEGORIES))
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut category, None, ALL_CATEGORIES);
                for tag in &self.categories {
                    ui.selectable_value(&mut category, Some(tag.clone()), tag.as_str());
                }
            });
        if category != self.session.filter().category {
            self.session.set_category(category);
        }

        ui.separator();

        ui.label("Title search")
            .on_hover_text("Ring nodes whose title contains this text.");
        let mut title_query = self.session.title_query().to_owned();
        if ui.text_edit_singleline(&mut title_query).changed() {
            self.session.set_title_query(title_query);
        }

        ui.separator();

        ui.checkbox(&mut self.live_physics, "Live physics simulation")
            .on_hover_text("Keep relaxing the layout until it settles.");

        ui.separator();

        self.draw_tag_highlights(ui);

        ui.separator();

        let graph = self.session.graph();
        ui.label(format!("nodes: {}", graph.node_count()));
        ui.label(format!("edges: {}", graph.edge_count()));
        ui.label(format!("temperature: {:.3}", self.session.temperature()));
    }

    fn draw_tag_highlights(&mut self, ui: &mut Ui) {
        ui.label("Highlight tags")
            .on_hover_text("Show only the edges sharing one of the checked tags.");
        ui.text_edit_singleline(&mut self.tag_search)
            .on_hover_text("Fuzzy-filter the tag list.");

        let matcher = SkimMatcherV2::default();
        let visible = matching_tags(&matcher, &self.categories, &self.tag_search);
        let mut highlighted = self.session.highlighted_tags().clone();
        let mut toggled = false;

        egui::ScrollArea::vertical()
            .id_salt("highlight_tags_scroll")
            .max_height(220.0)
            .auto_shrink([false, true])
            .show(ui, |ui| {
                for tag in visible {
                    let mut checked = highlighted.contains(tag);
                    if ui.checkbox(&mut checked, tag.as_str()).changed() {
                        toggled = true;
                        if checked {
                            highlighted.insert(tag.clone());
                        } else {
                            highlighted.remove(tag);
                        }
                    }
                }
            });

        if ui
            .add_enabled(!highlighted.is_empty(), egui::Button::new("Clear highlights"))
            .clicked()
        {
            highlighted.clear();
            toggled = true;
        }

        if toggled {
            self.session.set_highlighted_tags(highlighted);
        }
    }
}
