//! Linear undo history of canvas snapshots.
//!
//! One snapshot is appended per completed stroke or stamp. Undo pops the most
//! recent entry; the caller then restores the new top entry (or clears the
//! canvas when nothing is left).

pub mod snapshot;

pub use snapshot::Snapshot;

/// Ordered stack of snapshots, oldest first.
#[derive(Debug, Default, Clone)]
pub struct History {
    entries: Vec<Snapshot>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the snapshot of a completed draw operation.
    pub fn push(&mut self, snapshot: Snapshot) {
        log::debug!(
            "History push #{} ({} bytes)",
            self.entries.len() + 1,
            snapshot.len()
        );
        self.entries.push(snapshot);
    }

    /// Removes and returns the most recent snapshot, if any.
    pub fn pop(&mut self) -> Option<Snapshot> {
        self.entries.pop()
    }

    /// The snapshot that represents the current canvas state.
    pub fn latest(&self) -> Option<&Snapshot> {
        self.entries.last()
    }

    /// The snapshot an undo would restore: second-to-last entry.
    pub fn previous(&self) -> Option<&Snapshot> {
        self.entries
            .len()
            .checked_sub(2)
            .and_then(|index| self.entries.get(index))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Total encoded bytes held by the history.
    pub fn total_bytes(&self) -> usize {
        self.entries.iter().map(Snapshot::len).sum()
    }
}
