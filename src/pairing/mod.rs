//! Pairing module - date-seeded daily suggestion

mod selector;

pub use selector::{DailyPairing, PairingKind, PairingOutcome, PairingSelector};
