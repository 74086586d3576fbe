use crate::pair_index::PairRecord;

/// Minimum number of occurrences for a pair to be worth a new symbol.
pub(crate) const MIN_PAIR_COUNT: usize = 2;

/// Picks the pair to merge next.
///
/// The most frequent pair wins; ties go to the pair whose leftmost occurrence
/// starts first. Returns `None` when no pair occurs at least
/// [`MIN_PAIR_COUNT`] times.
pub(crate) fn pick_best<I>(records: I) -> Option<PairRecord>
where
    I: IntoIterator<Item = PairRecord>,
{
    records
        .into_iter()
        .filter(|record| record.count >= MIN_PAIR_COUNT)
        .max()
}
