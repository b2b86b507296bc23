//! The loaded collection.

use super::item::{Item, StatusKind};
use std::collections::HashSet;

/// All bracelets from one load of the sheet, in sheet order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    items: Vec<Item>,
}

impl Catalog {
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items whose status is in service.
    pub fn active_items(&self) -> Vec<&Item> {
        self.items.iter().filter(|item| item.is_active()).collect()
    }

    /// Distinct statuses in order of first appearance.
    pub fn statuses(&self) -> Vec<String> {
        self.unique_values(|item| &item.status)
    }

    /// Distinct colors in order of first appearance.
    pub fn colors(&self) -> Vec<String> {
        self.unique_values(|item| &item.color)
    }

    /// Distinct main crystals in order of first appearance.
    pub fn crystals(&self) -> Vec<String> {
        self.unique_values(|item| &item.main_crystal)
    }

    /// Initial status filter: the single in-service label seen first in the data.
    /// Empty (no filter) when the collection has none.
    pub fn default_status_selection(&self) -> Vec<String> {
        self.statuses()
            .into_iter()
            .find(|status| StatusKind::classify(status) == StatusKind::InService)
            .into_iter()
            .collect()
    }

    fn unique_values<F>(&self, field: F) -> Vec<String>
    where
        F: Fn(&Item) -> &String,
    {
        let mut seen = HashSet::new();
        self.items
            .iter()
            .map(field)
            .filter(|value| !value.is_empty() && seen.insert(value.as_str()))
            .cloned()
            .collect()
    }
}
