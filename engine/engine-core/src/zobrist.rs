//! Zobrist hashing over a declared feature layout.
//!
//! A game declares its discrete features as categories of `slots x values`
//! (e.g. "rubles": one slot per player, values `0..300`). The table holds one
//! random 64-bit key per (category, slot, value) and a state's hash is the
//! XOR of the keys for the features it reports.
//!
//! Keys come from a fixed seed, so hashes are stable across runs and across
//! engine instances. Tables are immutable after construction and can be
//! shared freely between threads.
//!
//! Out-of-range features are folded in rather than rejected: values above a
//! category's bound are clamped to its last value and slots past the end are
//! skipped. Both make the hash lossy for such states and are counted in
//! [`HashReport`].

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Seed used for every table unless a caller asks otherwise.
pub const ZOBRIST_SEED: u64 = 42;

/// Index of a category within a [`ZobristLayout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FeatureId(pub usize);

#[derive(Debug, Clone, PartialEq, Eq)]
struct FeatureSpec {
    name: &'static str,
    slots: usize,
    values: usize,
}

/// Ordered list of feature categories. The n-th call to
/// [`feature`](Self::feature) defines `FeatureId(n)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZobristLayout {
    specs: Vec<FeatureSpec>,
}

impl ZobristLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a category with `slots` positions, each taking one of `values`
    /// values. Zero sizes are bumped to one.
    pub fn feature(mut self, name: &'static str, slots: usize, values: usize) -> Self {
        self.specs.push(FeatureSpec {
            name,
            slots: slots.max(1),
            values: values.max(1),
        });
        self
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Total number of keys a table for this layout holds.
    pub fn key_count(&self) -> usize {
        self.specs.iter().map(|s| s.slots * s.values).sum()
    }

    /// Name of a category, if it exists.
    pub fn name(&self, feature: FeatureId) -> Option<&'static str> {
        self.specs.get(feature.0).map(|s| s.name)
    }
}

/// States that can be Zobrist-hashed.
pub trait ZobristFeatures {
    /// The layout every instance reports against. Must not depend on `self`.
    fn zobrist_layout() -> ZobristLayout;

    /// Report every feature of this state to `sink`.
    fn visit_features(&self, sink: &mut FeatureSink<'_>);
}

/// Outcome of hashing a state, including how lossy the hash was.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HashReport {
    pub key: u64,
    /// Values that exceeded their category bound and were clamped.
    pub clamped_values: u32,
    /// Features whose slot lay outside their category and were dropped.
    pub dropped_slots: u32,
}

impl HashReport {
    pub fn is_lossy(&self) -> bool {
        self.clamped_values > 0 || self.dropped_slots > 0
    }
}

/// Accumulates keys while a state reports its features.
pub struct FeatureSink<'a> {
    table: &'a ZobristTable,
    report: HashReport,
}

impl FeatureSink<'_> {
    /// Fold the key for `(feature, slot, value)` into the hash.
    ///
    /// Panics if `feature` is not part of the layout: that is a bug in the
    /// game's feature code, not a property of the state.
    pub fn put(&mut self, feature: FeatureId, slot: usize, value: usize) {
        let spec = &self.table.specs[feature.0];
        if slot >= spec.slots {
            self.report.dropped_slots += 1;
            return;
        }
        let value = if value >= spec.values {
            self.report.clamped_values += 1;
            spec.values - 1
        } else {
            value
        };
        let index = self.table.offsets[feature.0] + slot * spec.values + value;
        self.report.key ^= self.table.keys[index];
    }

    /// Fold a list of values into consecutive slots starting at `first_slot`.
    pub fn put_list<I>(&mut self, feature: FeatureId, first_slot: usize, values: I)
    where
        I: IntoIterator<Item = usize>,
    {
        for (i, value) in values.into_iter().enumerate() {
            self.put(feature, first_slot + i, value);
        }
    }
}

/// Immutable table of Zobrist keys for one layout.
#[derive(Debug, Clone)]
pub struct ZobristTable {
    specs: Vec<FeatureSpec>,
    offsets: Vec<usize>,
    keys: Vec<u64>,
}

impl ZobristTable {
    /// Generate keys for `layout` from `seed`.
    pub fn new(layout: &ZobristLayout, seed: u64) -> Self {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let mut offsets = Vec::with_capacity(layout.len());
        let mut total = 0;
        for spec in &layout.specs {
            offsets.push(total);
            total += spec.slots * spec.values;
        }
        let keys = (0..total).map(|_| rng.gen::<u64>()).collect();

        Self {
            specs: layout.specs.clone(),
            offsets,
            keys,
        }
    }

    /// Table for `S`'s layout with the default seed.
    pub fn for_state<S: ZobristFeatures>() -> Self {
        Self::new(&S::zobrist_layout(), ZOBRIST_SEED)
    }

    pub fn key_count(&self) -> usize {
        self.keys.len()
    }

    pub fn hash<S: ZobristFeatures + ?Sized>(&self, state: &S) -> u64 {
        self.hash_report(state).key
    }

    pub fn hash_report<S: ZobristFeatures + ?Sized>(&self, state: &S) -> HashReport {
        let mut sink = FeatureSink {
            table: self,
            report: HashReport::default(),
        };
        state.visit_features(&mut sink);
        sink.report
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::test_utils::{Countdown, Step};
    use crate::GameAction;

    #[test]
    fn test_same_seed_same_keys() {
        let a = ZobristTable::for_state::<Countdown>();
        let b = ZobristTable::for_state::<Countdown>();
        let state = Countdown::new(17);

        assert_eq!(a.hash(&state), b.hash(&state));
        assert_eq!(a.key_count(), 64 + 2);
    }

    #[test]
    fn test_different_seed_different_keys() {
        let layout = Countdown::zobrist_layout();
        let a = ZobristTable::new(&layout, ZOBRIST_SEED);
        let b = ZobristTable::new(&layout, 7);
        assert_ne!(a.hash(&Countdown::new(3)), b.hash(&Countdown::new(3)));
    }

    #[test]
    fn test_equal_states_equal_hashes() {
        let table = ZobristTable::for_state::<Countdown>();
        let mut rng = ChaCha20Rng::seed_from_u64(5);

        // 10 -> 9 -> 7 and 10 -> 8 -> 7 transpose to the same position.
        let mut a = Countdown::new(10);
        Step::One.apply(&mut a, &mut rng);
        Step::Two.apply(&mut a, &mut rng);
        let mut b = Countdown::new(10);
        Step::Two.apply(&mut b, &mut rng);
        Step::One.apply(&mut b, &mut rng);

        assert_eq!(a.remaining, b.remaining);
        assert_eq!(table.hash(&a), table.hash(&b));
    }

    #[test]
    fn test_seeded_chance_hashes_match() {
        let table = ZobristTable::for_state::<Countdown>();
        let root = Countdown::new(40);
        let mut a = root.clone();
        let mut b = root.clone();
        Step::Roll.apply_seeded(&mut a, 1234);
        Step::Roll.apply_seeded(&mut b, 1234);

        assert_eq!(table.hash(&a), table.hash(&b));
    }

    #[test]
    fn test_no_collisions_over_enumerated_states() {
        let table = ZobristTable::for_state::<Countdown>();
        let mut seen = HashSet::new();
        let mut count = 0;
        for remaining in 0..64 {
            for to_move in 0..2 {
                let state = Countdown {
                    remaining,
                    to_move,
                    rolls: Vec::new(),
                };
                seen.insert(table.hash(&state));
                count += 1;
            }
        }
        assert_eq!(seen.len(), count);
    }

    #[test]
    fn test_out_of_range_value_is_clamped_and_reported() {
        let table = ZobristTable::for_state::<Countdown>();
        let top = table.hash_report(&Countdown::new(63));
        let beyond = table.hash_report(&Countdown::new(500));

        assert!(!top.is_lossy());
        assert_eq!(beyond.clamped_values, 1);
        assert_eq!(top.key, beyond.key);
    }

    #[test]
    fn test_slot_outside_category_is_dropped() {
        struct Wide(Vec<usize>);
        impl ZobristFeatures for Wide {
            fn zobrist_layout() -> ZobristLayout {
                ZobristLayout::new().feature("cells", 2, 4)
            }
            fn visit_features(&self, sink: &mut FeatureSink<'_>) {
                sink.put_list(FeatureId(0), 0, self.0.iter().copied());
            }
        }

        let table = ZobristTable::for_state::<Wide>();
        let report = table.hash_report(&Wide(vec![1, 2, 3]));
        assert_eq!(report.dropped_slots, 1);
        assert_eq!(report.key, table.hash(&Wide(vec![1, 2])));
    }

    #[test]
    fn test_layout_names() {
        let layout = Countdown::zobrist_layout();
        assert_eq!(layout.len(), 2);
        assert_eq!(layout.name(FeatureId(1)), Some("to_move"));
        assert_eq!(layout.name(FeatureId(5)), None);
        assert_eq!(layout.key_count(), 66);
    }
}
