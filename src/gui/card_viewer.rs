//! Card Viewer Widget
//! Right side scrollable panel: the daily pairing banner and one card per bracelet.

use crate::data::{Item, StatusKind};
use crate::gui::thumbnails::{Thumbnail, ThumbnailCache};
use crate::pairing::{DailyPairing, PairingKind, PairingOutcome};
use egui::{Color32, RichText, ScrollArea};

const CARD_SPACING: f32 = 10.0;
const CARD_PHOTO_EDGE: f32 = 160.0;
const PAIRING_PHOTO_EDGE: f32 = 96.0;

const IN_SERVICE_COLOR: Color32 = Color32::from_rgb(40, 167, 69);
const DISASSEMBLED_COLOR: Color32 = Color32::from_rgb(255, 153, 0);
const PAIRING_COLOR: Color32 = Color32::from_rgb(155, 89, 182);

/// Scrollable card list with the daily pairing on top.
pub struct CardViewer {
    pub thumbnails: ThumbnailCache,
}

impl CardViewer {
    pub fn new(thumbnails: ThumbnailCache) -> Self {
        Self { thumbnails }
    }

    /// Draw the viewer for the currently visible items.
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        visible: &[&Item],
        total: usize,
        pairing: Option<&PairingOutcome>,
    ) {
        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                if let Some(outcome) = pairing {
                    self.draw_pairing(ui, outcome);
                    ui.add_space(CARD_SPACING);
                }

                ui.label(
                    RichText::new(format!(
                        "Showing {} bracelets (total collection: {})",
                        visible.len(),
                        total
                    ))
                    .size(12.0)
                    .color(Color32::GRAY),
                );
                ui.add_space(CARD_SPACING);

                if visible.is_empty() {
                    ui.vertical_centered(|ui| {
                        ui.add_space(40.0);
                        ui.label(
                            RichText::new("No bracelets match. Try other filters?").size(16.0),
                        );
                    });
                    return;
                }

                for item in visible {
                    self.draw_card(ui, item);
                    ui.add_space(CARD_SPACING);
                }
            });
    }

    fn draw_pairing(&mut self, ui: &mut egui::Ui, outcome: &PairingOutcome) {
        egui::Frame::none()
            .rounding(8.0)
            .stroke(egui::Stroke::new(2.0, PAIRING_COLOR))
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                match outcome {
                    PairingOutcome::Paired(pairing) => self.draw_pairing_body(ui, pairing),
                    PairingOutcome::InsufficientItems { active } => {
                        ui.label(
                            RichText::new("✨ Daily pairing")
                                .size(16.0)
                                .strong()
                                .color(PAIRING_COLOR),
                        );
                        ui.colored_label(
                            DISASSEMBLED_COLOR,
                            format!(
                                "⚠ Not enough bracelets in service for a pairing ({active} active)"
                            ),
                        );
                    }
                }
            });
    }

    fn draw_pairing_body(&mut self, ui: &mut egui::Ui, pairing: &DailyPairing) {
        let icon = match pairing.kind {
            PairingKind::ColorMatched => "🎨",
            PairingKind::Contrast => "🌓",
        };
        ui.horizontal(|ui| {
            ui.label(
                RichText::new(format!("✨ Daily pairing · {}", pairing.date.format("%Y-%m-%d")))
                    .size(16.0)
                    .strong()
                    .color(PAIRING_COLOR),
            );
            ui.label(RichText::new(format!("{icon} {}", pairing.kind.label())).size(13.0));
        });
        ui.add_space(8.0);

        ui.horizontal(|ui| {
            for item in [&pairing.primary, &pairing.partner] {
                ui.horizontal(|ui| {
                    self.draw_photo(ui, item, PAIRING_PHOTO_EDGE);
                    ui.vertical(|ui| {
                        ui.label(RichText::new(format!("#{} {}", item.id, item.name)).strong());
                        ui.label(format!("{} · {}", item.main_crystal, item.color));
                    });
                });
                ui.add_space(20.0);
            }
        });
    }

    /// Draw a single bracelet card
    fn draw_card(&mut self, ui: &mut egui::Ui, item: &Item) {
        egui::Frame::none()
            .rounding(8.0)
            .stroke(ui.visuals().widgets.noninteractive.bg_stroke)
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    self.draw_photo(ui, item, CARD_PHOTO_EDGE);
                    ui.add_space(12.0);

                    ui.vertical(|ui| {
                        ui.label(
                            RichText::new(format!("#{} {}", item.id, item.name))
                                .size(18.0)
                                .strong(),
                        );
                        ui.add_space(4.0);
                        ui.label(format!(
                            "Crystal: {} | Color: {}",
                            item.main_crystal, item.color
                        ));
                        ui.label(format!(
                            "Size: {} | Type: {}",
                            item.size_label(),
                            item.bracelet_type
                        ));

                        if let Some(note) = &item.note {
                            ui.add_space(4.0);
                            egui::Frame::none()
                                .fill(Color32::from_rgb(30, 60, 90))
                                .rounding(4.0)
                                .inner_margin(6.0)
                                .show(ui, |ui| {
                                    ui.label(RichText::new(format!("📝 {note}")).color(Color32::WHITE));
                                });
                        }

                        ui.add_space(6.0);
                        status_badge(ui, item);
                    });
                });
            });
    }

    fn draw_photo(&mut self, ui: &mut egui::Ui, item: &Item, edge: f32) {
        let size = egui::vec2(edge, edge);
        let thumbnail = match item.photo_url() {
            Some(url) => self.thumbnails.get(url),
            None => Thumbnail::Unavailable,
        };

        match thumbnail {
            Thumbnail::Ready(texture) => {
                ui.add_sized(size, egui::Image::from_texture(&texture).max_size(size));
            }
            Thumbnail::Loading => {
                ui.add_sized(size, egui::Spinner::new());
            }
            Thumbnail::Unavailable => {
                ui.add_sized(
                    size,
                    egui::Label::new(RichText::new("📷 No photo").italics().color(Color32::GRAY)),
                );
            }
        }
    }
}

fn status_color(kind: StatusKind) -> Color32 {
    match kind {
        StatusKind::InService => IN_SERVICE_COLOR,
        StatusKind::Disassembled => DISASSEMBLED_COLOR,
        StatusKind::Other => Color32::GRAY,
    }
}

fn status_badge(ui: &mut egui::Ui, item: &Item) {
    let color = status_color(item.status_kind());
    egui::Frame::none()
        .fill(color.gamma_multiply(0.2))
        .stroke(egui::Stroke::new(1.0, color))
        .rounding(4.0)
        .inner_margin(egui::Margin::symmetric(8.0, 2.0))
        .show(ui, |ui| {
            ui.label(RichText::new(&item.status).color(color).strong());
        });
}
