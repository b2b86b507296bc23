//! Filter Module
//! Narrows the catalog down to the rows matching the sidebar selections.

use super::{Catalog, Item};

/// Multi-select filter values. An empty list means "no filter" for that field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub statuses: Vec<String>,
    pub colors: Vec<String>,
    pub crystals: Vec<String>,
}

impl FilterSelection {
    /// Selection a fresh catalog starts with: in-service items only, when there are any.
    pub fn initial(catalog: &Catalog) -> Self {
        Self {
            statuses: catalog.default_status_selection(),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty() && self.colors.is_empty() && self.crystals.is_empty()
    }

    /// Whether a single item passes every active constraint.
    pub fn matches(&self, item: &Item) -> bool {
        allows(&self.statuses, &item.status)
            && allows(&self.colors, &item.color)
            && allows(&self.crystals, &item.main_crystal)
    }

    /// Drop selected values that no longer exist in the catalog.
    pub fn retain_known(&mut self, catalog: &Catalog) {
        let statuses = catalog.statuses();
        let colors = catalog.colors();
        let crystals = catalog.crystals();
        self.statuses.retain(|v| statuses.contains(v));
        self.colors.retain(|v| colors.contains(v));
        self.crystals.retain(|v| crystals.contains(v));
    }
}

fn allows(selected: &[String], value: &str) -> bool {
    selected.is_empty() || selected.iter().any(|s| s == value)
}

/// Applies a [`FilterSelection`] to a catalog.
pub struct ItemFilter;

impl ItemFilter {
    /// Rows passing the selection, in catalog order.
    pub fn apply<'a>(catalog: &'a Catalog, selection: &FilterSelection) -> Vec<&'a Item> {
        catalog
            .items()
            .iter()
            .filter(|item| selection.matches(item))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::item::sample;

    fn catalog() -> Catalog {
        let mut items = vec![
            sample("1", "red", "in service"),
            sample("2", "red", "disassembled"),
            sample("3", "blue", "in service"),
            sample("4", "green", "gifted"),
        ];
        items[2].main_crystal = "Lapis".to_string();
        items[3].main_crystal = "Jade".to_string();
        Catalog::new(items)
    }

    fn ids(items: &[&Item]) -> Vec<String> {
        items.iter().map(|item| item.id.clone()).collect()
    }

    #[test]
    fn empty_selection_returns_everything() {
        let catalog = catalog();
        let all = ItemFilter::apply(&catalog, &FilterSelection::default());
        assert_eq!(ids(&all), vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn constraints_combine() {
        let catalog = catalog();
        let selection = FilterSelection {
            statuses: vec!["in service".to_string()],
            colors: vec!["red".to_string(), "blue".to_string()],
            crystals: vec!["Lapis".to_string()],
        };
        assert_eq!(ids(&ItemFilter::apply(&catalog, &selection)), vec!["3"]);
    }

    #[test]
    fn every_selection_yields_a_matching_subset() {
        let catalog = catalog();
        let options = |values: Vec<String>| -> Vec<Vec<String>> {
            let mut sets = vec![Vec::new()];
            for v in &values {
                sets.push(vec![v.clone()]);
            }
            sets.push(values);
            sets
        };

        for statuses in options(catalog.statuses()) {
            for colors in options(catalog.colors()) {
                for crystals in options(catalog.crystals()) {
                    let selection = FilterSelection {
                        statuses: statuses.clone(),
                        colors: colors.clone(),
                        crystals: crystals.clone(),
                    };
                    for item in ItemFilter::apply(&catalog, &selection) {
                        assert!(catalog.items().contains(item));
                        assert!(statuses.is_empty() || statuses.contains(&item.status));
                        assert!(colors.is_empty() || colors.contains(&item.color));
                        assert!(crystals.is_empty() || crystals.contains(&item.main_crystal));
                    }
                }
            }
        }
    }

    #[test]
    fn initial_selection_shows_in_service() {
        let catalog = catalog();
        let selection = FilterSelection::initial(&catalog);
        assert_eq!(selection.statuses, vec!["in service"]);
        assert_eq!(ids(&ItemFilter::apply(&catalog, &selection)), vec!["1", "3"]);
    }

    #[test]
    fn retain_known_drops_stale_values() {
        let catalog = catalog();
        let mut selection = FilterSelection {
            statuses: vec!["in service".to_string(), "lost".to_string()],
            colors: vec!["purple".to_string()],
            crystals: vec!["Jade".to_string()],
        };
        selection.retain_known(&catalog);
        assert_eq!(selection.statuses, vec!["in service"]);
        assert!(selection.colors.is_empty());
        assert_eq!(selection.crystals, vec!["Jade"]);
    }
}
