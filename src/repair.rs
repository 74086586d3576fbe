//! RePair pairwise compression engine.
//!
//! Every round counts the adjacent pairs of the working sequence, picks the
//! most frequent one (ties go to the leftmost) and replaces each
//! non-overlapping occurrence, scanning left to right, with a fresh synthetic
//! symbol. Compression stops after the requested number of rounds, or as soon
//! as no pair occurs at least twice.
//!
//! # Example
//!
//! ```
//! use repair_rs::{Repair, Symbol};
//!
//! let mut repair = Repair::new();
//! repair.extend("aaaa".chars());
//! repair.compress(2).unwrap();
//!
//! // "aa" -> S0 gives S0 S0; that pair occurs once, so round two stops.
//! assert_eq!(repair.materialize(), vec![Symbol::Synthetic(0), Symbol::Synthetic(0)]);
//! assert_eq!(repair.rounds(), 1);
//! ```

use crate::config::{IndexStrategy, RepairConfig};
use crate::error::{RepairError, Result};
use crate::id_gen::IdGenerator;
use crate::pair_index::{IncrementalIndex, Pair, PairCounts, PairRecord};
use crate::selector::pick_best;
use crate::sequence::Sequence;
use crate::symbol::{Symbol, SymbolId};
use ahash::AHashMap as HashMap;
use std::hash::Hash;
use tracing::{debug, trace};

/// Lifecycle of the round loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// More rounds may still merge something.
    Running,
    /// A round found no pair occurring twice; nothing will change anymore.
    Stopped,
}

/// What one executed round did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundReport<T> {
    /// 1-based round number
    pub round: usize,
    /// The merged pair
    pub pair: (Symbol<T>, Symbol<T>),
    /// Occurrences of the pair when the round started, overlapping ones included
    pub count: usize,
    /// Input position of the leftmost occurrence
    pub first_position: usize,
    /// Id of the synthetic symbol that replaced the pair
    pub symbol: u32,
    /// Occurrences actually replaced
    pub replacements: usize,
}

/// Main RePair data structure.
///
/// Owns the working sequence exclusively. Values are pushed first, then
/// [`compress`](Repair::compress) runs merge rounds in place.
pub struct Repair<T> {
    /// Live symbol chain
    pub(crate) sequence: Sequence,

    /// Deduplicated terminal values (for efficient pair hashing)
    pub(crate) values_dedup: Vec<T>,

    /// Maps terminal values to their index in values_dedup
    value_to_index: HashMap<T, u32>,

    /// Synthetic symbol ids in creation order
    id_gen: IdGenerator,

    config: RepairConfig,

    state: EngineState,

    /// Pair index carried across rounds by the incremental strategy
    pub(crate) index: Option<IncrementalIndex>,

    /// Number of values added
    length: usize,

    /// One report per executed round
    history: Vec<RoundReport<T>>,

    /// Whether compression has been requested
    compressed: bool,
}

impl<T: Hash + Eq + Clone> Repair<T> {
    /// Creates a new empty Repair instance with the default configuration.
    pub fn new() -> Self {
        Self::with_config(RepairConfig::default())
    }

    /// Creates a new empty Repair instance.
    pub fn with_config(config: RepairConfig) -> Self {
        Self {
            sequence: Sequence::new(),
            values_dedup: Vec::new(),
            value_to_index: HashMap::default(),
            id_gen: IdGenerator::new(),
            config,
            state: EngineState::Running,
            index: None,
            length: 0,
            history: Vec::new(),
            compressed: false,
        }
    }

    /// Gets or creates an index for a terminal value.
    fn get_or_create_value_index(&mut self, value: &T) -> u32 {
        if let Some(&index) = self.value_to_index.get(value) {
            index
        } else {
            let index = self.values_dedup.len() as u32;
            self.values_dedup.push(value.clone());
            self.value_to_index.insert(value.clone(), index);
            index
        }
    }

    /// Adds a value to the end of the sequence.
    ///
    /// Must be called before `compress()`.
    pub fn push(&mut self, value: T) {
        assert!(
            !self.compressed,
            "Cannot add values after compression has been performed"
        );

        let index = self.get_or_create_value_index(&value);
        self.sequence.push(SymbolId::Terminal(index));
        self.length += 1;
    }

    /// Extends the sequence with multiple values.
    ///
    /// Must be called before `compress()`.
    pub fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }

    /// Runs up to `rounds` more merge rounds.
    ///
    /// Returns the number of rounds executed by this call, which is smaller
    /// than `rounds` when the engine stops early. Calling it again continues
    /// where the previous call left off. An empty sequence or `rounds == 0`
    /// is a no-op.
    ///
    /// # Errors
    ///
    /// [`RepairError::AlphabetExhausted`] if the configuration bounds the
    /// synthetic alphabet and the total number of requested rounds exceeds
    /// it. Nothing is merged in that case.
    pub fn compress(&mut self, rounds: usize) -> Result<usize> {
        if rounds == 0 || self.is_empty() {
            self.compressed = true;
            return Ok(0);
        }

        if let Some(capacity) = self.config.synthetic_capacity {
            let requested = self.id_gen.issued().saturating_add(rounds);
            if requested > capacity {
                return Err(RepairError::AlphabetExhausted {
                    requested,
                    capacity,
                });
            }
        }

        Ok(self.run_rounds(rounds))
    }

    /// Round loop without alphabet checks.
    pub(crate) fn run_rounds(&mut self, rounds: usize) -> usize {
        self.compressed = true;

        let mut executed = 0;
        while executed < rounds && self.state == EngineState::Running {
            match self.run_round() {
                Some(report) => {
                    self.history.push(report);
                    executed += 1;
                }
                None => {
                    debug!(
                        rounds = self.history.len(),
                        length = self.sequence.len(),
                        "No pair occurs twice, stopping"
                    );
                    self.state = EngineState::Stopped;
                    self.index = None;
                }
            }
        }

        executed
    }

    /// Executes one round, or returns `None` if no pair qualifies.
    fn run_round(&mut self) -> Option<RoundReport<T>> {
        let best = self.select_pair()?;

        let id = self.id_gen.get();
        let symbol = SymbolId::Synthetic(id);

        let replacements = match self.config.strategy {
            IndexStrategy::Rebuild => self.replace_rescan(best.pair, symbol),
            IndexStrategy::Incremental => self.replace_indexed(best.pair, symbol),
        };

        let round = self.history.len() + 1;
        debug!(
            round,
            pair = ?best.pair,
            count = best.count,
            first_position = best.first_position,
            symbol = id,
            replacements,
            "Merged pair"
        );

        Some(RoundReport {
            round,
            pair: (self.resolve(best.pair.0), self.resolve(best.pair.1)),
            count: best.count,
            first_position: best.first_position,
            symbol: id,
            replacements,
        })
    }

    /// Finds the pair to merge this round.
    fn select_pair(&mut self) -> Option<PairRecord> {
        match self.config.strategy {
            IndexStrategy::Rebuild => {
                let counts = PairCounts::scan(&self.sequence);
                trace!(distinct_pairs = counts.len(), "Rebuilt pair index");
                pick_best(counts.records())
            }
            IndexStrategy::Incremental => {
                let index = self
                    .index
                    .get_or_insert_with(|| IncrementalIndex::build(&self.sequence));
                pick_best(index.records())
            }
        }
    }

    /// Replaces all non-overlapping occurrences of `pair` by walking the chain.
    fn replace_rescan(&mut self, pair: Pair, symbol: SymbolId) -> usize {
        let mut count = 0;
        let mut current = self.sequence.head();

        while let Some(left) = current {
            let Some(right) = self.sequence.successor(left) else {
                break;
            };

            if self.sequence.pair_at(left) == Some(pair) {
                // Continue after the consumed right node
                current = self.sequence.merge_into(left, right, symbol);
                count += 1;
            } else {
                current = Some(right);
            }
        }

        count
    }

    /// Replaces all non-overlapping occurrences of `pair` using the
    /// incremental index, updating the pairs around each merge.
    fn replace_indexed(&mut self, pair: Pair, symbol: SymbolId) -> usize {
        let Some(index) = self.index.as_mut() else {
            return 0;
        };

        let mut count = 0;
        for left in index.occurrences(&pair) {
            // Consumed as the right half of the previous merge
            if !self.sequence.contains(left) {
                continue;
            }
            debug_assert_eq!(self.sequence.pair_at(left), Some(pair));

            let Some(right) = self.sequence.successor(left) else {
                continue;
            };
            let before = self.sequence.predecessor(left);

            if let Some(prev) = before {
                index.remove(&self.sequence, prev);
            }
            index.remove(&self.sequence, left);
            index.remove(&self.sequence, right);

            self.sequence.merge_into(left, right, symbol);

            if let Some(prev) = before {
                index.insert(&self.sequence, prev);
            }
            index.insert(&self.sequence, left);

            count += 1;
        }

        count
    }

    /// Converts a SymbolId back to a Symbol.
    fn resolve(&self, id: SymbolId) -> Symbol<T> {
        self.symbol_ref(id).cloned()
    }

    pub(crate) fn symbol_ref(&self, id: SymbolId) -> Symbol<&T> {
        match id {
            SymbolId::Terminal(index) => Symbol::Value(&self.values_dedup[index as usize]),
            SymbolId::Synthetic(id) => Symbol::Synthetic(id),
        }
    }

    /// Collects the current sequence.
    pub fn materialize(&self) -> Vec<Symbol<T>> {
        self.sequence
            .materialize()
            .into_iter()
            .map(|id| self.resolve(id))
            .collect()
    }

    /// Returns the number of values added to the sequence.
    pub fn len(&self) -> usize {
        self.length
    }

    /// Returns true if no values have been added.
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Returns the current length of the sequence.
    pub fn sequence_len(&self) -> usize {
        self.sequence.len()
    }

    /// Returns whether compression has been performed.
    pub fn is_compressed(&self) -> bool {
        self.compressed
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Number of rounds executed so far.
    pub fn rounds(&self) -> usize {
        self.history.len()
    }

    /// Reports of all executed rounds, oldest first.
    pub fn history(&self) -> &[RoundReport<T>] {
        &self.history
    }

    pub fn config(&self) -> &RepairConfig {
        &self.config
    }

    /// Returns compression statistics.
    pub fn stats(&self) -> RepairStats {
        RepairStats {
            input_length: self.length,
            output_length: self.sequence.len(),
            rounds: self.history.len(),
            merges: self.history.iter().map(|r| r.replacements).sum(),
            stopped: self.state == EngineState::Stopped,
        }
    }
}

impl<T: Hash + Eq + Clone> Default for Repair<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Compresses `input` for at most `rounds` rounds with the default engine.
///
/// ```
/// use repair_rs::{compress, Symbol};
///
/// let output = compress("aaaaa".chars(), 1);
/// assert_eq!(
///     output,
///     vec![Symbol::Synthetic(0), Symbol::Synthetic(0), Symbol::Value('a')]
/// );
/// ```
pub fn compress<T, I>(input: I, rounds: usize) -> Vec<Symbol<T>>
where
    T: Hash + Eq + Clone,
    I: IntoIterator<Item = T>,
{
    let mut repair = Repair::new();
    repair.extend(input);
    repair.run_rounds(rounds);
    repair.materialize()
}

/// Statistics about RePair compression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepairStats {
    /// Number of input symbols added
    pub input_length: usize,
    /// Current sequence length
    pub output_length: usize,
    /// Rounds executed
    pub rounds: usize,
    /// Total pair replacements over all rounds
    pub merges: usize,
    /// Whether the engine ran out of repeated pairs
    pub stopped: bool,
}

impl RepairStats {
    /// Returns the compression ratio as a percentage.
    ///
    /// Lower is better. 100% means no compression.
    pub fn compression_ratio(&self) -> f64 {
        if self.input_length == 0 {
            0.0
        } else {
            (self.output_length as f64 / self.input_length as f64) * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(input: &str, strategy: IndexStrategy) -> Repair<char> {
        let mut repair = Repair::with_config(RepairConfig::new().with_strategy(strategy));
        repair.extend(input.chars());
        repair
    }

    #[test]
    fn test_new() {
        let repair = Repair::<char>::new();
        assert_eq!(repair.len(), 0);
        assert!(repair.is_empty());
        assert_eq!(repair.rounds(), 0);
        assert_eq!(repair.state(), EngineState::Running);
        assert!(!repair.is_compressed());
    }

    #[test]
    fn test_push_and_extend() {
        let mut repair = Repair::new();
        repair.push('a');
        repair.extend(vec!['b', 'c']);
        assert_eq!(repair.len(), 3);
        assert_eq!(repair.sequence_len(), 3);
        assert_eq!(
            repair.materialize(),
            vec![Symbol::Value('a'), Symbol::Value('b'), Symbol::Value('c')]
        );
    }

    #[test]
    #[should_panic(expected = "Cannot add values after compression")]
    fn test_push_after_compress_panics() {
        let mut repair = Repair::new();
        repair.extend("abab".chars());
        repair.compress(1).unwrap();
        repair.push('a');
    }

    #[test]
    fn test_zero_rounds_is_noop() {
        let mut repair = engine("abab", IndexStrategy::Rebuild);
        assert_eq!(repair.compress(0), Ok(0));
        assert_eq!(repair.sequence_len(), 4);
        assert_eq!(repair.state(), EngineState::Running);
    }

    #[test]
    fn test_empty_input_is_noop() {
        let mut repair = Repair::<char>::with_config(RepairConfig::new().with_synthetic_capacity(1));
        // Empty input wins over the alphabet check.
        assert_eq!(repair.compress(5), Ok(0));
        assert!(repair.materialize().is_empty());
    }

    #[test]
    fn test_overlapping_run() {
        let mut repair = engine("aaaaa", IndexStrategy::Rebuild);
        assert_eq!(repair.compress(1), Ok(1));

        let report = &repair.history()[0];
        assert_eq!(report.pair, (Symbol::Value('a'), Symbol::Value('a')));
        assert_eq!(report.count, 4);
        assert_eq!(report.first_position, 0);
        assert_eq!(report.symbol, 0);
        assert_eq!(report.replacements, 2);
        assert_eq!(
            repair.materialize(),
            vec![Symbol::Synthetic(0), Symbol::Synthetic(0), Symbol::Value('a')]
        );
    }

    #[test]
    fn test_stops_when_no_pair_repeats() {
        let mut repair = engine("aaaa", IndexStrategy::Rebuild);
        assert_eq!(repair.compress(2), Ok(1));
        assert_eq!(repair.state(), EngineState::Stopped);

        // Stopped is terminal.
        assert_eq!(repair.compress(3), Ok(0));
        assert_eq!(repair.rounds(), 1);
    }

    #[test]
    fn test_single_pair_never_merged() {
        let mut repair = engine("aa", IndexStrategy::Incremental);
        assert_eq!(repair.compress(1), Ok(0));
        assert_eq!(repair.state(), EngineState::Stopped);
        assert_eq!(repair.sequence_len(), 2);
    }

    #[test]
    fn test_tie_break_leftmost() {
        // "is", "ss" and "si" all occur twice; "is" starts first.
        let mut repair = engine("mississippi", IndexStrategy::Rebuild);
        repair.compress(1).unwrap();
        let report = &repair.history()[0];
        assert_eq!(report.pair, (Symbol::Value('i'), Symbol::Value('s')));
        assert_eq!(report.first_position, 1);
    }

    #[test]
    fn test_resumes_across_calls() {
        let mut split = engine("aabbccddaabbccdd", IndexStrategy::Rebuild);
        split.compress(1).unwrap();
        split.compress(2).unwrap();

        let mut whole = engine("aabbccddaabbccdd", IndexStrategy::Rebuild);
        whole.compress(3).unwrap();

        assert_eq!(split.materialize(), whole.materialize());
        assert_eq!(split.history(), whole.history());
    }

    #[test]
    fn test_alphabet_capacity() {
        let config = RepairConfig::new().with_synthetic_capacity(2);
        let mut repair = Repair::with_config(config);
        repair.extend("abababab".chars());

        assert_eq!(
            repair.compress(3),
            Err(RepairError::AlphabetExhausted {
                requested: 3,
                capacity: 2
            })
        );
        assert_eq!(repair.sequence_len(), 8);

        assert_eq!(repair.compress(2), Ok(2));
        assert_eq!(
            repair.compress(1),
            Err(RepairError::AlphabetExhausted {
                requested: 3,
                capacity: 2
            })
        );
    }

    #[test]
    fn test_alphabet_capacity_huge_request() {
        let config = RepairConfig::new().with_synthetic_capacity(26);
        let mut repair = Repair::with_config(config);
        repair.extend("abababab".chars());

        assert_eq!(repair.compress(1), Ok(1));
        assert_eq!(
            repair.compress(usize::MAX),
            Err(RepairError::AlphabetExhausted {
                requested: usize::MAX,
                capacity: 26
            })
        );
        assert_eq!(repair.rounds(), 1);
        assert_eq!(repair.sequence_len(), 4);
    }

    #[test]
    fn test_incremental_matches_rebuild() {
        for input in ["ababcababc", "aaabbb", "mississippi", "aabbaabb", "banana"] {
            let mut rebuild = engine(input, IndexStrategy::Rebuild);
            let mut incremental = engine(input, IndexStrategy::Incremental);
            rebuild.compress(5).unwrap();
            incremental.compress(5).unwrap();

            assert_eq!(rebuild.materialize(), incremental.materialize(), "{input}");
            assert_eq!(rebuild.history(), incremental.history(), "{input}");
        }
    }

    #[test]
    fn test_stats() {
        let mut repair = engine("abababab", IndexStrategy::Rebuild);
        repair.compress(3).unwrap();

        // ab -> A gives AAAA, AA -> B gives BB, then BB occurs once.
        let stats = repair.stats();
        assert_eq!(stats.input_length, 8);
        assert_eq!(stats.output_length, 2);
        assert_eq!(stats.rounds, 2);
        assert_eq!(stats.merges, 6);
        assert!(stats.stopped);
        assert!((stats.compression_ratio() - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_compress_function() {
        assert_eq!(
            compress(vec![1u8, 2, 1, 2], 1),
            vec![Symbol::Synthetic(0), Symbol::Synthetic(0)]
        );
        assert!(compress(Vec::<u8>::new(), 3).is_empty());
    }
}
