//! Iterator over the current (possibly compressed) sequence.

use crate::repair::Repair;
use crate::sequence::Keys;
use crate::symbol::Symbol;
use std::hash::Hash;

/// Iterator that walks the live sequence from head to tail.
///
/// Yields merge symbols as they are; rules are never expanded.
pub struct RepairIter<'a, T> {
    repair: &'a Repair<T>,
    keys: Keys<'a>,
}

impl<'a, T: Hash + Eq + Clone> RepairIter<'a, T> {
    pub(crate) fn new(repair: &'a Repair<T>) -> Self {
        Self {
            repair,
            keys: repair.sequence.keys(),
        }
    }
}

impl<'a, T: Hash + Eq + Clone> Iterator for RepairIter<'a, T> {
    type Item = Symbol<&'a T>;

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.keys.next()?;
        Some(self.repair.symbol_ref(self.repair.sequence.symbol(key)))
    }
}

impl<T: Hash + Eq + Clone> Repair<T> {
    /// Returns an iterator over the current sequence.
    pub fn iter(&self) -> RepairIter<'_, T> {
        RepairIter::new(self)
    }
}

impl<'a, T: Hash + Eq + Clone> IntoIterator for &'a Repair<T> {
    type Item = Symbol<&'a T>;
    type IntoIter = RepairIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
