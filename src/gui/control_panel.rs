//! Control Panel Widget
//! Left side panel with the data source, refresh button and filter controls.

use crate::data::{Catalog, FilterSelection};
use egui::{Color32, RichText, ScrollArea};

/// Left side control panel with the sheet source and multi-select filters.
pub struct ControlPanel {
    pub selection: FilterSelection,
    pub source_url: String,
    statuses: Vec<String>,
    colors: Vec<String>,
    crystals: Vec<String>,
    has_loaded: bool,
    pub status: String,
    pub is_error: bool,
    pub refresh_enabled: bool,
}

impl ControlPanel {
    pub fn new(source_url: &str) -> Self {
        Self {
            selection: FilterSelection::default(),
            source_url: source_url.to_string(),
            statuses: Vec::new(),
            colors: Vec::new(),
            crystals: Vec::new(),
            has_loaded: false,
            status: "Ready".to_string(),
            is_error: false,
            refresh_enabled: true,
        }
    }

    /// Update filter options after a load. The first load starts from the
    /// default selection; later loads keep whatever still exists. An empty
    /// catalog (a failed load) leaves the selection untouched.
    pub fn update_options(&mut self, catalog: &Catalog) {
        self.statuses = catalog.statuses();
        self.colors = catalog.colors();
        self.crystals = catalog.crystals();

        if catalog.is_empty() {
            return;
        }
        if self.has_loaded {
            self.selection.retain_known(catalog);
        } else {
            self.selection = FilterSelection::initial(catalog);
            self.has_loaded = true;
        }
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("💎 Crystal Vault")
                    .size(22.0)
                    .color(Color32::from_rgb(155, 89, 182)),
            );
            ui.label(
                RichText::new("Bracelet collection")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data Source Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.label(RichText::new("Published sheet (CSV)").size(12.0));
                ui.add(
                    egui::Label::new(
                        RichText::new(&self.source_url)
                            .size(10.0)
                            .color(Color32::GRAY),
                    )
                    .truncate(),
                )
                .on_hover_text(&self.source_url);

                ui.add_space(5.0);
                ui.add_enabled_ui(self.refresh_enabled, |ui| {
                    if ui.button("🔄 Refresh data").clicked() {
                        action = ControlPanelAction::Refresh;
                    }
                });
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Filter Section =====
        ui.label(RichText::new("🔍 Filters").size(14.0).strong());
        ui.label(
            RichText::new("Nothing ticked means everything is shown")
                .size(10.0)
                .color(Color32::GRAY),
        );
        ui.add_space(5.0);

        multi_select(ui, "status_filter", "Status", &self.statuses, &mut self.selection.statuses);
        multi_select(ui, "color_filter", "Color", &self.colors, &mut self.selection.colors);
        multi_select(
            ui,
            "crystal_filter",
            "Main crystal",
            &self.crystals,
            &mut self.selection.crystals,
        );

        ui.add_space(5.0);
        ui.add_enabled_ui(!self.selection.is_empty(), |ui| {
            if ui.small_button("Clear all filters").clicked() {
                self.selection = FilterSelection::default();
            }
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Status Section =====
        let status_color = if self.is_error {
            Color32::from_rgb(220, 53, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    /// Set the status line
    pub fn set_status(&mut self, status: &str, is_error: bool) {
        self.status = status.to_string();
        self.is_error = is_error;
    }
}

/// Checkbox list over `options`, editing `selected` in place.
fn multi_select(
    ui: &mut egui::Ui,
    id: &str,
    title: &str,
    options: &[String],
    selected: &mut Vec<String>,
) {
    let header = if selected.is_empty() {
        title.to_string()
    } else {
        format!("{title} ({})", selected.len())
    };

    egui::CollapsingHeader::new(RichText::new(header).strong())
        .id_salt(id)
        .default_open(true)
        .show(ui, |ui| {
            if options.is_empty() {
                ui.label(RichText::new("No values").color(Color32::GRAY));
                return;
            }

            ScrollArea::vertical()
                .id_salt(id)
                .max_height(150.0)
                .show(ui, |ui| {
                    for option in options {
                        let mut checked = selected.contains(option);
                        if ui.checkbox(&mut checked, option.as_str()).changed() {
                            if checked {
                                selected.push(option.clone());
                            } else {
                                selected.retain(|s| s != option);
                            }
                        }
                    }
                });

            if !selected.is_empty() && ui.small_button("Clear").clicked() {
                selected.clear();
            }
        });
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    Refresh,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sample;

    #[test]
    fn first_load_applies_default_selection() {
        let mut panel = ControlPanel::new("https://example.com/sheet.csv");
        let catalog = Catalog::new(vec![
            sample("1", "red", "in service"),
            sample("2", "blue", "disassembled"),
        ]);

        panel.update_options(&catalog);
        assert_eq!(panel.selection.statuses, vec!["in service"]);
        assert_eq!(panel.colors, vec!["red", "blue"]);
    }

    #[test]
    fn reload_keeps_surviving_selection() {
        let mut panel = ControlPanel::new("https://example.com/sheet.csv");
        panel.update_options(&Catalog::new(vec![
            sample("1", "red", "in service"),
            sample("2", "blue", "disassembled"),
        ]));
        panel.selection.statuses = vec!["disassembled".to_string()];
        panel.selection.colors = vec!["red".to_string(), "blue".to_string()];

        panel.update_options(&Catalog::new(vec![
            sample("1", "red", "in service"),
            sample("3", "green", "disassembled"),
        ]));
        assert_eq!(panel.selection.statuses, vec!["disassembled"]);
        assert_eq!(panel.selection.colors, vec!["red"]);
    }

    #[test]
    fn failed_refresh_does_not_lose_the_default_filter() {
        let mut panel = ControlPanel::new("https://example.com/sheet.csv");
        let catalog = Catalog::new(vec![
            sample("1", "red", "in service"),
            sample("2", "blue", "disassembled"),
        ]);

        panel.update_options(&catalog);
        panel.update_options(&Catalog::default());
        assert!(panel.statuses.is_empty());
        assert_eq!(panel.selection.statuses, vec!["in service"]);

        panel.update_options(&catalog);
        assert_eq!(panel.selection.statuses, vec!["in service"]);
    }

    #[test]
    fn failed_first_load_applies_default_on_next_load() {
        let mut panel = ControlPanel::new("https://example.com/sheet.csv");
        panel.update_options(&Catalog::default());
        assert!(panel.selection.is_empty());

        panel.update_options(&Catalog::new(vec![sample("1", "red", "in service")]));
        assert_eq!(panel.selection.statuses, vec!["in service"]);
    }
}
