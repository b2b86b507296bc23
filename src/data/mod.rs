//! Data module - sheet loading, catalog model and filtering

mod catalog;
mod filter;
mod item;
mod loader;

pub use catalog::Catalog;
pub use filter::{FilterSelection, ItemFilter};
pub use item::{Item, StatusKind};
pub use loader::{http_client, DataLoader};

#[cfg(test)]
pub(crate) use item::sample;
