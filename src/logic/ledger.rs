//! Partnership ledger: which unordered player pairs have already been teamed.

use crate::models::PlayerId;
use std::collections::BTreeSet;

/// Set of partnerships used so far, keyed by the (low id, high id) pair.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PartnershipLedger {
    pairs: BTreeSet<(PlayerId, PlayerId)>,
}

fn key(a: PlayerId, b: PlayerId) -> (PlayerId, PlayerId) {
    debug_assert_ne!(a, b, "a player cannot partner themselves");
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

impl PartnershipLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_played(&self, a: PlayerId, b: PlayerId) -> bool {
        self.pairs.contains(&key(a, b))
    }

    /// Mark `a` and `b` as partners. Recording the same pair twice is a no-op.
    ///
    /// # Panics
    /// In debug builds, if `a == b`.
    pub fn record(&mut self, a: PlayerId, b: PlayerId) {
        self.pairs.insert(key(a, b));
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
