//! Crystal Vault - Crystal Bracelet Catalog Viewer
//!
//! Browses a bracelet collection published as a spreadsheet CSV feed, with
//! filters and a date-seeded daily pairing.

mod config;
mod data;
mod gui;
mod pairing;

use config::AppConfig;
use eframe::egui;
use gui::CrystalVaultApp;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("crystal_vault=info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn main() -> eframe::Result<()> {
    init_tracing();

    let config = AppConfig::from_env();
    info!(url = %config.sheet_url, "starting crystal vault");

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 800.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Crystal Vault"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Crystal Vault",
        options,
        Box::new(|cc| Ok(Box::new(CrystalVaultApp::new(cc, config)))),
    )
}
