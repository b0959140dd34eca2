//! HistoryManager - bounded undo/redo over whole-grid snapshots
//!
//! Snapshots form a linear timeline with a cursor on the state the host last
//! committed or navigated to. Capacity counts undo steps, so up to
//! `capacity + 1` snapshots are retained. Pushing after an undo discards the
//! redo branch; overflowing the capacity evicts the oldest snapshot.

use std::collections::VecDeque;

use super::snapshot::Snapshot;

/// Undo steps kept when no capacity is configured
pub const DEFAULT_HISTORY_CAPACITY: usize = 20;

#[derive(Debug, Clone)]
pub struct HistoryManager {
    snapshots: VecDeque<Snapshot>,
    /// Index of the current snapshot, None while empty
    cursor: Option<usize>,
    capacity: usize,
}

impl Default for HistoryManager {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl HistoryManager {
    pub fn new(capacity: usize) -> Self {
        Self {
            snapshots: VecDeque::with_capacity(capacity.saturating_add(1).min(64)),
            cursor: None,
            capacity,
        }
    }

    /// Commit a new state. Drops any redo branch and evicts the oldest
    /// snapshots beyond the capacity.
    pub fn push_snapshot(&mut self, snapshot: Snapshot) {
        if let Some(cursor) = self.cursor {
            let discarded = self.snapshots.len() - (cursor + 1);
            if discarded > 0 {
                log::debug!("History: discarding {} redo snapshot(s)", discarded);
                self.snapshots.truncate(cursor + 1);
            }
        }

        self.snapshots.push_back(snapshot);

        let max_len = self.capacity.saturating_add(1);
        while self.snapshots.len() > max_len {
            self.snapshots.pop_front();
            log::debug!("History: evicted oldest snapshot (capacity {})", self.capacity);
        }

        self.cursor = Some(self.snapshots.len() - 1);
    }

    /// Step back one state and return it
    pub fn undo(&mut self) -> Option<&Snapshot> {
        let cursor = self.cursor.filter(|&c| c > 0)?;
        self.cursor = Some(cursor - 1);
        self.snapshots.get(cursor - 1)
    }

    /// Step forward one state and return it
    pub fn redo(&mut self) -> Option<&Snapshot> {
        let cursor = self.cursor?;
        if cursor + 1 >= self.snapshots.len() {
            return None;
        }
        self.cursor = Some(cursor + 1);
        self.snapshots.get(cursor + 1)
    }

    pub fn can_undo(&self) -> bool {
        self.cursor.is_some_and(|c| c > 0)
    }

    pub fn can_redo(&self) -> bool {
        self.cursor
            .is_some_and(|c| c + 1 < self.snapshots.len())
    }

    /// Drop every snapshot
    pub fn clear(&mut self) {
        self.snapshots.clear();
        self.cursor = None;
    }

    /// Snapshot the cursor points at
    pub fn current(&self) -> Option<&Snapshot> {
        self.cursor.and_then(|c| self.snapshots.get(c))
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Retained snapshots, including the redo branch
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Maximum undo steps
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::cell_store::CellStore;

    /// 1x1 snapshot tagged by its material id
    fn snap(tag: u16) -> Snapshot {
        let mut store = CellStore::new(1, 1, 20.0);
        store.set(0, 0, tag);
        Snapshot::capture(&store)
    }

    fn tag(snapshot: Option<&Snapshot>) -> Option<u16> {
        snapshot.and_then(|s| s.material(0, 0))
    }

    #[test]
    fn test_empty_history() {
        let mut history = HistoryManager::default();
        assert_eq!(history.capacity(), DEFAULT_HISTORY_CAPACITY);
        assert!(history.is_empty());
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert!(history.undo().is_none());
        assert!(history.redo().is_none());
        assert!(history.current().is_none());
    }

    #[test]
    fn test_single_snapshot_cannot_undo() {
        let mut history = HistoryManager::new(5);
        history.push_snapshot(snap(1));
        assert!(!history.can_undo());
        assert!(history.undo().is_none());
        assert_eq!(tag(history.current()), Some(1));
    }

    #[test]
    fn test_push_undo_redo() {
        let mut history = HistoryManager::new(5);
        history.push_snapshot(snap(1));
        history.push_snapshot(snap(2));
        history.push_snapshot(snap(3));

        assert_eq!(tag(history.undo()), Some(2));
        assert_eq!(tag(history.undo()), Some(1));
        assert!(history.undo().is_none());

        assert_eq!(tag(history.redo()), Some(2));
        assert_eq!(tag(history.redo()), Some(3));
        assert!(history.redo().is_none());
    }

    #[test]
    fn test_undo_then_redo_returns_to_same_state() {
        let mut history = HistoryManager::new(5);
        for t in 1..=4 {
            history.push_snapshot(snap(t));
        }
        let before = history.current().cloned();

        history.undo();
        let redone = history.redo().cloned();

        assert_eq!(redone, before);
        assert_eq!(history.current().cloned(), before);
    }

    #[test]
    fn test_push_after_undo_clears_redo() {
        let mut history = HistoryManager::new(5);
        history.push_snapshot(snap(1));
        history.push_snapshot(snap(2));
        history.push_snapshot(snap(3));

        history.undo();
        assert!(history.can_redo());

        history.push_snapshot(snap(9));
        assert!(!history.can_redo());
        assert!(history.redo().is_none());
        assert_eq!(history.len(), 3);
        assert_eq!(tag(history.undo()), Some(2));
        assert_eq!(tag(history.undo()), Some(1));
    }

    #[test]
    fn test_capacity_two_keeps_two_undo_steps() {
        let mut history = HistoryManager::new(2);
        for t in 1..=4 {
            history.push_snapshot(snap(t));
        }

        assert_eq!(history.len(), 3);
        assert_eq!(tag(history.undo()), Some(3));
        assert_eq!(tag(history.undo()), Some(2));
        assert!(!history.can_undo());
        assert!(history.undo().is_none());
    }

    #[test]
    fn test_eviction_bounds_undo_depth() {
        let mut history = HistoryManager::new(20);
        for t in 1..=22 {
            history.push_snapshot(snap(t));
        }

        assert_eq!(history.len(), 21);
        for expected in (2..=21).rev() {
            assert_eq!(tag(history.undo()), Some(expected));
        }
        assert!(history.undo().is_none());
    }

    #[test]
    fn test_zero_capacity_keeps_only_current() {
        let mut history = HistoryManager::new(0);
        history.push_snapshot(snap(1));
        history.push_snapshot(snap(2));

        assert_eq!(history.len(), 1);
        assert!(!history.can_undo());
        assert_eq!(tag(history.current()), Some(2));
    }

    #[test]
    fn test_clear() {
        let mut history = HistoryManager::new(3);
        history.push_snapshot(snap(1));
        history.push_snapshot(snap(2));
        history.clear();

        assert!(history.is_empty());
        assert_eq!(history.cursor(), None);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }
}
