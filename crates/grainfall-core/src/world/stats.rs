//! Tick statistics collection

/// Trait for collecting per-tick statistics
///
/// The scheduler and facade record into this without knowing whether anyone
/// is counting.
pub trait SimStats {
    /// An awake cell was reached by the traversal
    fn record_visit(&mut self);

    /// A material update function was invoked
    fn record_dispatch(&mut self);

    /// An awake cell was skipped because it was already updated this tick
    fn record_skip_updated(&mut self);

    /// Two cells were swapped
    fn record_move(&mut self);

    /// A material id was written
    fn record_set(&mut self);

    /// A facade call was rejected (out of bounds or unknown material)
    fn record_rejected(&mut self);
}

/// A no-op implementation for when stats collection is not needed
#[derive(Default)]
pub struct NoopStats;

impl SimStats for NoopStats {
    fn record_visit(&mut self) {}
    fn record_dispatch(&mut self) {}
    fn record_skip_updated(&mut self) {}
    fn record_move(&mut self) {}
    fn record_set(&mut self) {}
    fn record_rejected(&mut self) {}
}

/// Counters for one tick
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickCounters {
    pub visited: u64,
    pub dispatched: u64,
    pub skipped_updated: u64,
    pub moves: u64,
    pub sets: u64,
    pub rejected: u64,
}

impl TickCounters {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl SimStats for TickCounters {
    fn record_visit(&mut self) {
        self.visited += 1;
    }

    fn record_dispatch(&mut self) {
        self.dispatched += 1;
    }

    fn record_skip_updated(&mut self) {
        self.skipped_updated += 1;
    }

    fn record_move(&mut self) {
        self.moves += 1;
    }

    fn record_set(&mut self) {
        self.sets += 1;
    }

    fn record_rejected(&mut self) {
        self.rejected += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_stats_all_methods() {
        let mut stats = NoopStats;

        for _ in 0..100 {
            stats.record_visit();
            stats.record_dispatch();
            stats.record_move();
            stats.record_rejected();
        }
    }

    #[test]
    fn test_tick_counters() {
        let mut stats = TickCounters::default();

        stats.record_visit();
        stats.record_visit();
        stats.record_dispatch();
        stats.record_skip_updated();
        stats.record_move();
        stats.record_move();
        stats.record_move();
        stats.record_set();
        stats.record_rejected();

        assert_eq!(stats.visited, 2);
        assert_eq!(stats.dispatched, 1);
        assert_eq!(stats.skipped_updated, 1);
        assert_eq!(stats.moves, 3);
        assert_eq!(stats.sets, 1);
        assert_eq!(stats.rejected, 1);

        stats.reset();
        assert_eq!(stats, TickCounters::default());
    }
}
