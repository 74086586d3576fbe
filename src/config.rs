/// How the pair index is kept current between rounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndexStrategy {
    /// Rescan the whole sequence every round
    #[default]
    Rebuild,
    /// Update only the pairs around each merge
    Incremental,
}

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RepairConfig {
    /// Pair index maintenance strategy
    pub strategy: IndexStrategy,
    /// Number of synthetic symbols available, if bounded.
    ///
    /// Requests for more rounds in total are rejected with
    /// [`RepairError::AlphabetExhausted`](crate::RepairError::AlphabetExhausted).
    pub synthetic_capacity: Option<usize>,
}

impl RepairConfig {
    /// Creates the default configuration: full rebuild, unbounded alphabet.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strategy(mut self, strategy: IndexStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_synthetic_capacity(mut self, capacity: usize) -> Self {
        self.synthetic_capacity = Some(capacity);
        self
    }
}
