/// Sequential generator for synthetic symbol ids.
///
/// Ids are never freed or reused: the n-th successful round always gets id `n`.
#[derive(Debug, Default)]
pub(crate) struct IdGenerator {
    next: u32,
}

impl IdGenerator {
    /// Creates a new ID generator starting from ID 0.
    pub(crate) fn new() -> Self {
        Self { next: 0 }
    }

    /// Gets the next id in creation order.
    pub(crate) fn get(&mut self) -> u32 {
        let id = self.next;
        self.next = self
            .next
            .checked_add(1)
            .expect("synthetic symbol ids exhausted");
        id
    }

    /// Number of ids handed out so far.
    pub(crate) fn issued(&self) -> usize {
        self.next as usize
    }
}
