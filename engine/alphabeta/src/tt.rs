//! Bounded transposition table with least-recently-used eviction.
//!
//! Entries live in a slot vector threaded by an intrusive doubly linked
//! recency list; a hash map from position key to slot index gives O(1)
//! lookup, touch and eviction. Once `capacity` slots are in use, storing a
//! new key recycles the least recently used slot.

use std::collections::HashMap;

const NIL: u32 = u32::MAX;

/// Bounds on a position's value, valid for searches of at most `depth`.
///
/// `lower == upper` marks an exact value. Unknown sides are infinite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TtEntry {
    pub lower: f64,
    pub upper: f64,
    pub depth: u32,
}

impl TtEntry {
    pub fn exact(value: f64, depth: u32) -> Self {
        Self {
            lower: value,
            upper: value,
            depth,
        }
    }

    pub fn lower_bound(value: f64, depth: u32) -> Self {
        Self {
            lower: value,
            upper: f64::INFINITY,
            depth,
        }
    }

    pub fn upper_bound(value: f64, depth: u32) -> Self {
        Self {
            lower: f64::NEG_INFINITY,
            upper: value,
            depth,
        }
    }

    pub fn is_exact(&self) -> bool {
        self.lower == self.upper
    }
}

/// What a lookup means for the node being searched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Probe {
    /// The stored bounds settle the node; return this value.
    Cutoff(f64),
    /// Continue searching with a window narrowed by the stored bounds.
    Window { alpha: f64, beta: f64 },
    /// No entry, or one from a shallower search.
    Miss,
}

/// Table usage counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TtStats {
    pub probes: u64,
    pub hits: u64,
    pub stores: u64,
    pub evictions: u64,
}

#[derive(Debug, Clone)]
struct Slot {
    key: u64,
    entry: TtEntry,
    prev: u32,
    next: u32,
}

#[derive(Debug, Clone)]
pub struct TranspositionTable {
    capacity: usize,
    index: HashMap<u64, u32>,
    slots: Vec<Slot>,
    /// Most recently used slot.
    head: u32,
    /// Least recently used slot, next to be evicted.
    tail: u32,
    stats: TtStats,
}

impl TranspositionTable {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.min(NIL as usize);
        Self {
            capacity,
            index: HashMap::new(),
            slots: Vec::new(),
            head: NIL,
            tail: NIL,
            stats: TtStats::default(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn stats(&self) -> TtStats {
        self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = TtStats::default();
    }

    pub fn clear(&mut self) {
        self.index.clear();
        self.slots.clear();
        self.head = NIL;
        self.tail = NIL;
    }

    /// Look up `key` without touching its recency.
    pub fn peek(&self, key: u64) -> Option<&TtEntry> {
        self.index.get(&key).map(|&i| &self.slots[i as usize].entry)
    }

    /// Every stored `(key, entry)` pair, in no particular order.
    pub fn entries(&self) -> impl Iterator<Item = (u64, &TtEntry)> + '_ {
        self.index
            .iter()
            .map(|(&key, &i)| (key, &self.slots[i as usize].entry))
    }

    /// Look up `key` and mark it most recently used.
    pub fn get(&mut self, key: u64) -> Option<TtEntry> {
        let i = *self.index.get(&key)?;
        self.touch(i);
        Some(self.slots[i as usize].entry)
    }

    /// Insert or replace the entry for `key`, evicting the least recently
    /// used entry when the table is full.
    pub fn store(&mut self, key: u64, entry: TtEntry) {
        debug_assert!(entry.lower <= entry.upper, "inverted bounds: {entry:?}");
        if self.capacity == 0 {
            return;
        }
        self.stats.stores += 1;

        if let Some(&i) = self.index.get(&key) {
            self.slots[i as usize].entry = entry;
            self.touch(i);
            return;
        }

        let i = if self.slots.len() < self.capacity {
            self.slots.push(Slot {
                key,
                entry,
                prev: NIL,
                next: NIL,
            });
            (self.slots.len() - 1) as u32
        } else {
            let i = self.tail;
            self.unlink(i);
            let slot = &mut self.slots[i as usize];
            self.index.remove(&slot.key);
            slot.key = key;
            slot.entry = entry;
            self.stats.evictions += 1;
            i
        };
        self.index.insert(key, i);
        self.push_front(i);
    }

    /// Consult the table for a node searched to `depth` with window
    /// `(alpha, beta)`.
    ///
    /// Entries from shallower searches are ignored. Otherwise an exact
    /// entry, a lower bound at or above `beta`, or an upper bound at or
    /// below `alpha` cut the node off; anything else narrows the window.
    pub fn probe(&mut self, key: u64, depth: u32, alpha: f64, beta: f64) -> Probe {
        self.stats.probes += 1;
        let entry = match self.get(key) {
            Some(entry) if entry.depth >= depth => entry,
            _ => return Probe::Miss,
        };
        self.stats.hits += 1;

        if entry.is_exact() || entry.lower >= beta {
            return Probe::Cutoff(entry.lower);
        }
        if entry.upper <= alpha {
            return Probe::Cutoff(entry.upper);
        }
        Probe::Window {
            alpha: alpha.max(entry.lower),
            beta: beta.min(entry.upper),
        }
    }

    fn touch(&mut self, i: u32) {
        if self.head != i {
            self.unlink(i);
            self.push_front(i);
        }
    }

    fn unlink(&mut self, i: u32) {
        let Slot { prev, next, .. } = self.slots[i as usize];
        if prev == NIL {
            self.head = next;
        } else {
            self.slots[prev as usize].next = next;
        }
        if next == NIL {
            self.tail = prev;
        } else {
            self.slots[next as usize].prev = prev;
        }
    }

    fn push_front(&mut self, i: u32) {
        let old_head = self.head;
        {
            let slot = &mut self.slots[i as usize];
            slot.prev = NIL;
            slot.next = old_head;
        }
        if old_head != NIL {
            self.slots[old_head as usize].prev = i;
        }
        self.head = i;
        if self.tail == NIL {
            self.tail = i;
        }
    }
}
