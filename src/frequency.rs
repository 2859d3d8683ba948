use std::collections::BTreeMap;
use std::collections::btree_map;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{HuffmanError, Result};
use crate::symbol::{Symbol, describe};

/// Occurrence counts per symbol.
///
/// Every stored count is positive and the counts sum to at most `u64::MAX`, so every node weight
/// of a tree built from the table fits in a `u64`. Entries iterate in symbol order.
///
/// Serialized as a plain map; deserialization applies the same checks as
/// [`from_counts`](Self::from_counts).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable<S: Ord> {
    counts: BTreeMap<S, u64>,
    total: u64,
}

impl<S: Symbol> FrequencyTable<S> {
    pub const fn new() -> Self {
        Self {
            counts: BTreeMap::new(),
            total: 0,
        }
    }

    /// Counts every symbol yielded by `symbols`.
    pub fn from_symbols<I: IntoIterator<Item = S>>(symbols: I) -> Self {
        let mut table = Self::new();
        for symbol in symbols {
            // one per item, so the total is bounded by the number of items
            *table.counts.entry(symbol).or_insert(0) += 1;
            table.total += 1;
        }
        table
    }

    /// Builds a table from explicit `(symbol, count)` pairs.
    ///
    /// Repeated symbols accumulate. A zero count or a total past `u64::MAX` is rejected.
    pub fn from_counts<I: IntoIterator<Item = (S, u64)>>(counts: I) -> Result<Self> {
        let mut table = Self::new();
        for (symbol, count) in counts {
            table.insert(symbol, count)?;
        }
        Ok(table)
    }

    /// Adds `count` occurrences of `symbol`.
    pub fn insert(&mut self, symbol: S, count: u64) -> Result<()> {
        if count == 0 {
            return Err(HuffmanError::ZeroFrequency { symbol: describe(&symbol) });
        }
        self.total = self.total.checked_add(count).ok_or(HuffmanError::WeightOverflow)?;
        // a single count never exceeds the total
        *self.counts.entry(symbol).or_insert(0) += count;
        Ok(())
    }

    /// Adds one occurrence of `symbol`.
    pub fn increment(&mut self, symbol: S) -> Result<()> {
        self.insert(symbol, 1)
    }

    pub fn get(&self, symbol: &S) -> Option<u64> {
        self.counts.get(symbol).copied()
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts, which is also the length of the sequence the table was counted from.
    pub const fn total(&self) -> u64 {
        self.total
    }

    pub fn symbols(&self) -> impl Iterator<Item = &S> {
        self.counts.keys()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, S, u64> {
        self.counts.iter()
    }
}

impl<S: Symbol + Serialize> Serialize for FrequencyTable<S> {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> std::result::Result<Ser::Ok, Ser::Error> {
        self.counts.serialize(serializer)
    }
}

impl<'de, S: Symbol + Deserialize<'de>> Deserialize<'de> for FrequencyTable<S> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let counts = BTreeMap::<S, u64>::deserialize(deserializer)?;
        Self::from_counts(counts).map_err(serde::de::Error::custom)
    }
}

impl<S: Symbol> Default for FrequencyTable<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, S: Symbol> IntoIterator for &'a FrequencyTable<S> {
    type Item = (&'a S, &'a u64);
    type IntoIter = btree_map::Iter<'a, S, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.iter()
    }
}
