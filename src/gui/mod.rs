//! GUI module - User interface components

mod app;
mod card_viewer;
mod control_panel;
mod thumbnails;

pub use app::CrystalVaultApp;
pub use card_viewer::CardViewer;
pub use control_panel::{ControlPanel, ControlPanelAction};
