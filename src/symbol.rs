use slotmap::DefaultKey;

/// A symbol of the working sequence.
///
/// Either an element of the original input or a merge symbol introduced by
/// one compression round. Synthetic ids are handed out in creation order,
/// so the first successful round produces `Synthetic(0)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol<T> {
    /// An original input value.
    Value(T),

    /// A merge symbol, numbered by the round that created it.
    Synthetic(u32),
}

impl<T> Symbol<T> {
    /// Returns true for merge symbols.
    pub fn is_synthetic(&self) -> bool {
        matches!(self, Symbol::Synthetic(_))
    }

    /// Returns the input value, if this is one.
    pub fn value(&self) -> Option<&T> {
        match self {
            Symbol::Value(v) => Some(v),
            Symbol::Synthetic(_) => None,
        }
    }
}

impl<T: Clone> Symbol<&T> {
    /// Maps a `Symbol<&T>` to a `Symbol<T>` by cloning the value.
    pub fn cloned(self) -> Symbol<T> {
        match self {
            Symbol::Value(v) => Symbol::Value(v.clone()),
            Symbol::Synthetic(id) => Symbol::Synthetic(id),
        }
    }
}

/// Compact identifier for a symbol stored in the arena.
///
/// Terminal values are deduplicated so pairs can be hashed and compared
/// without touching `T`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum SymbolId {
    /// Terminal symbol with index into the engine's deduplicated values
    Terminal(u32),
    /// Merge symbol
    Synthetic(u32),
}

/// A live position in the doubly-linked sequence.
#[derive(Debug)]
pub(crate) struct SymbolNode {
    pub symbol: SymbolId,
    /// Index of the input element this node was created for.
    ///
    /// Origins increase strictly along the chain, so they order pairs exactly
    /// like a left-to-right traversal does.
    pub origin: usize,
    pub prev: Option<DefaultKey>,
    pub next: Option<DefaultKey>,
}

impl SymbolNode {
    pub(crate) fn new(symbol: SymbolId, origin: usize) -> Self {
        Self {
            symbol,
            origin,
            prev: None,
            next: None,
        }
    }
}
