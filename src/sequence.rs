//! Doubly-linked symbol sequence backed by a generational arena.
//!
//! Nodes are only created while the input is loaded. A merge rewrites the
//! left node in place and removes the right node from the arena, so the
//! arena length is always the current sequence length.

use crate::symbol::{SymbolId, SymbolNode};
use slotmap::{DefaultKey, SlotMap};

/// The working sequence of a compression engine.
#[derive(Debug, Default)]
pub(crate) struct Sequence {
    nodes: SlotMap<DefaultKey, SymbolNode>,
    head: Option<DefaultKey>,
    tail: Option<DefaultKey>,
    /// Number of nodes ever appended; the origin of the next node.
    appended: usize,
}

impl Sequence {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Builds a sequence from symbols in input order.
    #[cfg(test)]
    pub(crate) fn initialize<I: IntoIterator<Item = SymbolId>>(symbols: I) -> Self {
        let mut sequence = Self::new();
        for symbol in symbols {
            sequence.push(symbol);
        }
        sequence
    }

    /// Appends a symbol after the current tail.
    pub(crate) fn push(&mut self, symbol: SymbolId) -> DefaultKey {
        let key = self.nodes.insert(SymbolNode::new(symbol, self.appended));
        self.appended += 1;

        self.nodes[key].prev = self.tail;
        match self.tail {
            Some(tail) => self.nodes[tail].next = Some(key),
            None => self.head = Some(key),
        }
        self.tail = Some(key);

        key
    }

    pub(crate) fn head(&self) -> Option<DefaultKey> {
        self.head
    }

    pub(crate) fn successor(&self, key: DefaultKey) -> Option<DefaultKey> {
        self.nodes[key].next
    }

    pub(crate) fn predecessor(&self, key: DefaultKey) -> Option<DefaultKey> {
        self.nodes[key].prev
    }

    pub(crate) fn symbol(&self, key: DefaultKey) -> SymbolId {
        self.nodes[key].symbol
    }

    pub(crate) fn origin(&self, key: DefaultKey) -> usize {
        self.nodes[key].origin
    }

    /// Whether `key` is still a live node.
    pub(crate) fn contains(&self, key: DefaultKey) -> bool {
        self.nodes.contains_key(key)
    }

    /// The pair starting at `key`, or `None` at the tail.
    pub(crate) fn pair_at(&self, key: DefaultKey) -> Option<(SymbolId, SymbolId)> {
        let next = self.nodes[key].next?;
        Some((self.nodes[key].symbol, self.nodes[next].symbol))
    }

    /// Replaces the adjacent nodes `left` and `right` by a single node
    /// holding `symbol`.
    ///
    /// `left` is reused and `right` is removed. Returns the node that followed
    /// `right`, which is where a non-overlapping scan continues.
    ///
    /// # Panics
    ///
    /// Panics if `right` is not the successor of `left`.
    pub(crate) fn merge_into(
        &mut self,
        left: DefaultKey,
        right: DefaultKey,
        symbol: SymbolId,
    ) -> Option<DefaultKey> {
        assert!(
            self.nodes[left].next == Some(right),
            "Merge requires consecutive symbols"
        );

        let after = self.nodes[right].next;

        self.nodes[left].symbol = symbol;
        self.nodes[left].next = after;
        match after {
            Some(next) => self.nodes[next].prev = Some(left),
            None => self.tail = Some(left),
        }

        self.nodes.remove(right);

        after
    }

    /// Number of live nodes.
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Iterates over live node keys from head to tail.
    pub(crate) fn keys(&self) -> Keys<'_> {
        Keys {
            sequence: self,
            current: self.head,
        }
    }

    /// Collects the live symbols from head to tail.
    pub(crate) fn materialize(&self) -> Vec<SymbolId> {
        self.keys().map(|key| self.symbol(key)).collect()
    }
}

/// Iterator over the live chain.
pub(crate) struct Keys<'a> {
    sequence: &'a Sequence,
    current: Option<DefaultKey>,
}

impl Iterator for Keys<'_> {
    type Item = DefaultKey;

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.current?;
        self.current = self.sequence.successor(key);
        Some(key)
    }
}
