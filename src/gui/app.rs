//! Crystal Vault Main Application
//! Main window with the filter panel and the card viewer.

use crate::config::AppConfig;
use crate::data::{Catalog, DataLoader, ItemFilter};
use crate::gui::thumbnails::ThumbnailCache;
use crate::gui::{CardViewer, ControlPanel, ControlPanelAction};
use crate::pairing::{PairingOutcome, PairingSelector};
use chrono::{Local, NaiveDate};
use egui::SidePanel;
use std::sync::mpsc::{channel, Receiver};
use std::thread;
use tracing::info;

/// Sheet loading result from background thread
enum LoadResult {
    Complete(Catalog),
    Failed(String),
}

/// Main application window.
pub struct CrystalVaultApp {
    config: AppConfig,
    catalog: Catalog,
    control_panel: ControlPanel,
    card_viewer: CardViewer,

    // Daily pairing, recomputed when the catalog or the date changes
    pairing: Option<(NaiveDate, PairingOutcome)>,

    // Async sheet loading
    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,
}

impl CrystalVaultApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let mut app = Self {
            control_panel: ControlPanel::new(&config.sheet_url),
            card_viewer: CardViewer::new(ThumbnailCache::new(&config)),
            catalog: Catalog::default(),
            pairing: None,
            load_rx: None,
            is_loading: false,
            config,
        };
        app.start_load();
        app
    }

    /// Fetch the sheet in a background thread.
    fn start_load(&mut self) {
        if self.is_loading {
            return; // Already loading
        }

        let (tx, rx) = channel();
        self.load_rx = Some(rx);
        self.is_loading = true;
        self.control_panel.refresh_enabled = false;
        self.control_panel.set_status("Loading collection...", false);

        let loader = DataLoader::new(self.config.clone());
        thread::spawn(move || {
            let result = match loader.load_or_empty() {
                (catalog, None) => LoadResult::Complete(catalog),
                (_, Some(error)) => LoadResult::Failed(error.to_string()),
            };
            let _ = tx.send(result);
        });
    }

    /// Drop cached data and reload from the sheet
    fn handle_refresh(&mut self) {
        info!("refresh requested");
        self.card_viewer.thumbnails.clear();
        self.start_load();
    }

    /// Check for sheet loading results
    fn check_load_results(&mut self) {
        let Some(rx) = self.load_rx.take() else {
            return;
        };

        match rx.try_recv() {
            Ok(LoadResult::Complete(catalog)) => {
                self.control_panel.set_status(
                    &format!("Loaded {} bracelets", catalog.len()),
                    false,
                );
                self.set_catalog(catalog);
            }
            Ok(LoadResult::Failed(error)) => {
                self.control_panel.set_status(&error, true);
                self.set_catalog(Catalog::default());
            }
            Err(std::sync::mpsc::TryRecvError::Empty) => {
                // Put receiver back, still loading
                self.load_rx = Some(rx);
                return;
            }
            Err(std::sync::mpsc::TryRecvError::Disconnected) => {
                self.control_panel
                    .set_status("data unavailable: loader stopped unexpectedly", true);
                self.set_catalog(Catalog::default());
            }
        }

        self.is_loading = false;
        self.control_panel.refresh_enabled = true;
    }

    fn set_catalog(&mut self, catalog: Catalog) {
        self.control_panel.update_options(&catalog);
        self.catalog = catalog;
        self.pairing = None;
    }

    /// Today's pairing, recomputed after a reload or when the day rolls over.
    fn current_pairing(&mut self) -> Option<&PairingOutcome> {
        if self.catalog.is_empty() {
            return None;
        }

        let today = Local::now().date_naive();
        let stale = !matches!(&self.pairing, Some((day, _)) if *day == today);
        if stale {
            let outcome = PairingSelector::select(&self.catalog, today);
            self.pairing = Some((today, outcome));
        }
        self.pairing.as_ref().map(|(_, outcome)| outcome)
    }
}

impl eframe::App for CrystalVaultApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for background results
        self.check_load_results();
        self.card_viewer.thumbnails.poll(ctx);

        // Request repaint while anything is in flight
        if self.is_loading || self.card_viewer.thumbnails.has_pending() {
            ctx.request_repaint();
        }

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(260.0)
            .max_width(320.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    match self.control_panel.show(ui) {
                        ControlPanelAction::Refresh => self.handle_refresh(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Card Viewer
        let pairing = self.current_pairing().cloned();
        let visible = ItemFilter::apply(&self.catalog, &self.control_panel.selection);
        let total = self.catalog.len();

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.is_loading && self.catalog.is_empty() {
                ui.centered_and_justified(|ui| {
                    ui.spinner();
                });
                return;
            }
            self.card_viewer.show(ui, &visible, total, pairing.as_ref());
        });
    }
}
