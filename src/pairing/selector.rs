//! Daily Pairing Selector Module
//! Picks two active bracelets for a given day, reproducibly.
//!
//! The generator is ChaCha8 seeded with the date as `YYYYMMDD`; the second pick
//! uses `YYYYMMDD + 1`. Each pick is one `gen_range(0..n)` draw over the
//! candidates in sheet order.

use crate::data::{Catalog, Item};
use chrono::{Datelike, NaiveDate};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

/// How the second bracelet was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairingKind {
    /// Shares the primary's color.
    ColorMatched,
    /// No other active bracelet shares the color.
    Contrast,
}

impl PairingKind {
    pub fn label(&self) -> &'static str {
        match self {
            PairingKind::ColorMatched => "color-matched",
            PairingKind::Contrast => "contrast pairing",
        }
    }
}

/// Two bracelets suggested for the day.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyPairing {
    pub date: NaiveDate,
    pub primary: Item,
    pub partner: Item,
    pub kind: PairingKind,
}

/// Result of asking for a pairing.
#[derive(Debug, Clone, PartialEq)]
pub enum PairingOutcome {
    Paired(DailyPairing),
    /// Fewer than two distinct active bracelets.
    InsufficientItems { active: usize },
}

/// Seed for a date: the integer `YYYYMMDD`.
pub fn date_seed(date: NaiveDate) -> u64 {
    date.year() as u64 * 10_000 + date.month() as u64 * 100 + date.day() as u64
}

/// Selects the featured pair of active items.
pub struct PairingSelector;

impl PairingSelector {
    /// Pairing for `date`. Only in-service items are considered.
    pub fn select(catalog: &Catalog, date: NaiveDate) -> PairingOutcome {
        let active = catalog.active_items();
        if active.len() < 2 {
            return PairingOutcome::InsufficientItems {
                active: active.len(),
            };
        }

        let seed = date_seed(date);
        let primary = pick(&active, seed);

        let others: Vec<&Item> = active
            .iter()
            .copied()
            .filter(|item| item.id != primary.id)
            .collect();
        // A blank color matches nothing.
        let color = primary.color.trim();
        let same_color: Vec<&Item> = others
            .iter()
            .copied()
            .filter(|item| !color.is_empty() && item.color.trim() == color)
            .collect();

        let (partner, kind) = if !same_color.is_empty() {
            (pick(&same_color, seed + 1), PairingKind::ColorMatched)
        } else if !others.is_empty() {
            (pick(&others, seed + 1), PairingKind::Contrast)
        } else {
            return PairingOutcome::InsufficientItems {
                active: active.len(),
            };
        };

        debug!(
            seed,
            primary = %primary.id,
            partner = %partner.id,
            kind = kind.label(),
            "daily pairing selected"
        );

        PairingOutcome::Paired(DailyPairing {
            date,
            primary: primary.clone(),
            partner: partner.clone(),
            kind,
        })
    }
}

/// Uniform pick from a non-empty slice with a freshly seeded generator.
fn pick<'a>(candidates: &[&'a Item], seed: u64) -> &'a Item {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    candidates[rng.gen_range(0..candidates.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sample;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn select(items: &[Item], day: NaiveDate) -> PairingOutcome {
        PairingSelector::select(&Catalog::new(items.to_vec()), day)
    }

    fn paired(outcome: PairingOutcome) -> DailyPairing {
        match outcome {
            PairingOutcome::Paired(pairing) => pairing,
            other => panic!("expected a pairing, got {other:?}"),
        }
    }

    #[test]
    fn seed_is_yyyymmdd() {
        assert_eq!(date_seed(date(2024, 3, 7)), 20240307);
        assert_eq!(date_seed(date(1999, 12, 31)), 19991231);
    }

    #[test]
    fn same_day_same_pairing() {
        let items: Vec<Item> = (1..=8)
            .map(|i| sample(&i.to_string(), if i % 2 == 0 { "red" } else { "blue" }, "in service"))
            .collect();
        let day = date(2024, 5, 1);

        let first = paired(select(&items, day));
        let second = paired(select(&items, day));
        assert_eq!(first.primary.id, second.primary.id);
        assert_eq!(first.partner.id, second.partner.id);
        assert_ne!(first.primary.id, first.partner.id);
    }

    #[test]
    fn fewer_than_two_active_is_insufficient() {
        let items = vec![
            sample("1", "red", "in service"),
            sample("2", "red", "disassembled"),
            sample("3", "red", "gifted"),
        ];
        assert_eq!(
            select(&items, date(2024, 1, 1)),
            PairingOutcome::InsufficientItems { active: 1 }
        );
        assert_eq!(
            select(&[], date(2024, 1, 1)),
            PairingOutcome::InsufficientItems { active: 0 }
        );
    }

    #[test]
    fn duplicate_ids_do_not_pair_with_themselves() {
        let items = vec![sample("1", "red", "in service"), sample("1", "red", "in service")];
        assert_eq!(
            select(&items, date(2024, 1, 1)),
            PairingOutcome::InsufficientItems { active: 2 }
        );
    }

    #[test]
    fn unmatched_color_falls_back_to_contrast() {
        let items = vec![sample("1", "red", "in service"), sample("2", "blue", "in service")];
        let pairing = paired(select(&items, date(2024, 2, 29)));
        assert_eq!(pairing.kind, PairingKind::Contrast);
        assert_ne!(pairing.primary.id, pairing.partner.id);
    }

    #[test]
    fn blank_colors_are_not_a_match() {
        let items = vec![
            sample("1", "", "in service"),
            sample("2", " ", "in service"),
        ];
        for d in 1..=10 {
            let pairing = paired(select(&items, date(2024, 6, d)));
            assert_eq!(pairing.kind, PairingKind::Contrast);
        }
    }

    #[test]
    fn red_pair_and_blue_single() {
        let items = vec![
            sample("1", "red", "in service"),
            sample("2", "red", "in service"),
            sample("3", "blue", "in service"),
        ];

        let start = date(2024, 1, 1);
        for offset in 0..60 {
            let day = start + chrono::Days::new(offset);
            let pairing = paired(select(&items, day));
            match pairing.primary.id.as_str() {
                "1" => {
                    assert_eq!(pairing.partner.id, "2");
                    assert_eq!(pairing.kind, PairingKind::ColorMatched);
                }
                "2" => {
                    assert_eq!(pairing.partner.id, "1");
                    assert_eq!(pairing.kind, PairingKind::ColorMatched);
                }
                "3" => {
                    assert!(pairing.partner.id == "1" || pairing.partner.id == "2");
                    assert_eq!(pairing.kind, PairingKind::Contrast);
                }
                other => panic!("unexpected primary {other}"),
            }
        }
    }

    #[test]
    fn inactive_items_are_never_picked() {
        let items = vec![
            sample("1", "red", "in service"),
            sample("2", "red", "disassembled"),
            sample("3", "blue", "in service"),
        ];
        for d in 1..=28 {
            let pairing = paired(select(&items, date(2024, 2, d)));
            assert_ne!(pairing.primary.id, "2");
            assert_ne!(pairing.partner.id, "2");
        }
    }

    #[test]
    fn labels() {
        assert_eq!(PairingKind::ColorMatched.label(), "color-matched");
        assert_eq!(PairingKind::Contrast.label(), "contrast pairing");
    }
}
