//! Pair frequency tracking.
//!
//! [`PairCounts::scan`] rebuilds the index from scratch by walking the live
//! chain once. [`IncrementalIndex`] keeps the same information up to date
//! across merges by touching only the pairs around each merged position.
//! Both report identical [`PairRecord`]s for the same sequence.

use crate::sequence::Sequence;
use crate::symbol::SymbolId;
use ahash::AHashMap as HashMap;
use slotmap::DefaultKey;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// An ordered pair of adjacent symbols.
pub(crate) type Pair = (SymbolId, SymbolId);

/// Occurrence statistics of one pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PairStats {
    pub count: usize,
    /// Origin of the left node of the leftmost occurrence.
    pub first_position: usize,
}

/// A candidate pair with its frequency and leftmost position.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub(crate) struct PairRecord {
    pub pair: Pair,
    pub count: usize,
    pub first_position: usize,
}

impl Ord for PairRecord {
    fn cmp(&self, other: &Self) -> Ordering {
        // Higher count wins, then the leftmost occurrence
        self.count
            .cmp(&other.count)
            .then_with(|| other.first_position.cmp(&self.first_position))
    }
}

impl PartialOrd for PairRecord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Pair counts of a single round, built by a full scan.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct PairCounts {
    pairs: HashMap<Pair, PairStats>,
}

impl PairCounts {
    /// Counts every adjacent pair of the live chain.
    pub(crate) fn scan(sequence: &Sequence) -> Self {
        let mut pairs: HashMap<Pair, PairStats> = HashMap::default();

        for key in sequence.keys() {
            let Some(pair) = sequence.pair_at(key) else {
                continue;
            };
            let position = sequence.origin(key);

            pairs
                .entry(pair)
                .and_modify(|stats| {
                    stats.count += 1;
                    stats.first_position = stats.first_position.min(position);
                })
                .or_insert(PairStats {
                    count: 1,
                    first_position: position,
                });
        }

        Self { pairs }
    }

    #[cfg(test)]
    pub(crate) fn get(&self, pair: &Pair) -> Option<PairStats> {
        self.pairs.get(pair).copied()
    }

    /// Number of distinct pairs.
    pub(crate) fn len(&self) -> usize {
        self.pairs.len()
    }

    pub(crate) fn records(&self) -> impl Iterator<Item = PairRecord> + '_ {
        self.pairs.iter().map(|(&pair, stats)| PairRecord {
            pair,
            count: stats.count,
            first_position: stats.first_position,
        })
    }
}

/// Pair index maintained across merges.
///
/// Every pair maps to its live occurrences keyed by the origin of their left
/// node, so the count is the map length and the leftmost position is the
/// first key.
#[derive(Debug, Default)]
pub(crate) struct IncrementalIndex {
    occurrences: HashMap<Pair, BTreeMap<usize, DefaultKey>>,
}

impl IncrementalIndex {
    /// Indexes every pair of the sequence.
    pub(crate) fn build(sequence: &Sequence) -> Self {
        let mut index = Self::default();
        for key in sequence.keys() {
            index.insert(sequence, key);
        }
        index
    }

    /// Adds the pair currently starting at `key`, if any.
    pub(crate) fn insert(&mut self, sequence: &Sequence, key: DefaultKey) {
        if let Some(pair) = sequence.pair_at(key) {
            self.occurrences
                .entry(pair)
                .or_default()
                .insert(sequence.origin(key), key);
        }
    }

    /// Drops the pair currently starting at `key`, if any.
    ///
    /// Must be called before the sequence around `key` changes.
    pub(crate) fn remove(&mut self, sequence: &Sequence, key: DefaultKey) {
        let Some(pair) = sequence.pair_at(key) else {
            return;
        };

        if let Some(positions) = self.occurrences.get_mut(&pair) {
            positions.remove(&sequence.origin(key));
            if positions.is_empty() {
                self.occurrences.remove(&pair);
            }
        }
    }

    /// Left nodes of all occurrences of `pair`, in sequence order.
    pub(crate) fn occurrences(&self, pair: &Pair) -> Vec<DefaultKey> {
        self.occurrences
            .get(pair)
            .map(|positions| positions.values().copied().collect())
            .unwrap_or_default()
    }

    pub(crate) fn records(&self) -> impl Iterator<Item = PairRecord> + '_ {
        self.occurrences.iter().filter_map(|(&pair, positions)| {
            let (&first_position, _) = positions.first_key_value()?;
            Some(PairRecord {
                pair,
                count: positions.len(),
                first_position,
            })
        })
    }

    /// Converts the index into the counts a full scan would produce.
    #[cfg(test)]
    pub(crate) fn to_counts(&self) -> PairCounts {
        let pairs = self
            .records()
            .map(|record| {
                (
                    record.pair,
                    PairStats {
                        count: record.count,
                        first_position: record.first_position,
                    },
                )
            })
            .collect();

        PairCounts { pairs }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terminals(ids: &[u32]) -> Sequence {
        Sequence::initialize(ids.iter().map(|&id| SymbolId::Terminal(id)))
    }

    fn pair(a: u32, b: u32) -> Pair {
        (SymbolId::Terminal(a), SymbolId::Terminal(b))
    }

    #[test]
    fn test_scan_counts_and_positions() {
        // a b a b c
        let seq = terminals(&[0, 1, 0, 1, 2]);
        let counts = PairCounts::scan(&seq);

        assert_eq!(counts.len(), 3);
        assert_eq!(
            counts.get(&pair(0, 1)),
            Some(PairStats {
                count: 2,
                first_position: 0
            })
        );
        assert_eq!(
            counts.get(&pair(1, 0)),
            Some(PairStats {
                count: 1,
                first_position: 1
            })
        );
        assert_eq!(
            counts.get(&pair(1, 2)),
            Some(PairStats {
                count: 1,
                first_position: 3
            })
        );
    }

    #[test]
    fn test_scan_counts_overlapping_runs() {
        // Overlapping occurrences are all counted: "aaa" has "aa" twice.
        let seq = terminals(&[0, 0, 0]);
        let counts = PairCounts::scan(&seq);
        assert_eq!(counts.get(&pair(0, 0)).map(|s| s.count), Some(2));
    }

    #[test]
    fn test_scan_short_sequences() {
        assert_eq!(PairCounts::scan(&terminals(&[])).len(), 0);
        assert_eq!(PairCounts::scan(&terminals(&[3])).len(), 0);
    }

    #[test]
    fn test_record_ordering() {
        let frequent = PairRecord {
            pair: pair(0, 1),
            count: 3,
            first_position: 9,
        };
        let left = PairRecord {
            pair: pair(1, 2),
            count: 2,
            first_position: 0,
        };
        let right = PairRecord {
            pair: pair(2, 3),
            count: 2,
            first_position: 4,
        };

        assert!(frequent > left);
        assert!(left > right);
    }

    #[test]
    fn test_incremental_build_matches_scan() {
        let seq = terminals(&[0, 1, 0, 1, 1, 0, 0, 0]);
        let index = IncrementalIndex::build(&seq);
        assert_eq!(index.to_counts(), PairCounts::scan(&seq));
    }

    #[test]
    fn test_incremental_tracks_merge() {
        // a b a b -> merge the first "ab"
        let mut seq = terminals(&[0, 1, 0, 1]);
        let mut index = IncrementalIndex::build(&seq);
        let keys: Vec<_> = seq.keys().collect();

        index.remove(&seq, keys[0]);
        index.remove(&seq, keys[1]);
        seq.merge_into(keys[0], keys[1], SymbolId::Synthetic(0));
        index.insert(&seq, keys[0]);

        assert_eq!(index.to_counts(), PairCounts::scan(&seq));
        assert_eq!(index.occurrences(&pair(0, 1)), vec![keys[2]]);
    }

    #[test]
    fn test_incremental_occurrences_in_order() {
        let seq = terminals(&[0, 1, 2, 0, 1, 2, 0, 1]);
        let index = IncrementalIndex::build(&seq);
        let keys: Vec<_> = seq.keys().collect();

        assert_eq!(
            index.occurrences(&pair(0, 1)),
            vec![keys[0], keys[3], keys[6]]
        );
        assert!(index.occurrences(&pair(2, 2)).is_empty());
    }
}
