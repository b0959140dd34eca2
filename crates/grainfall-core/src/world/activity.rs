//! Wake/sleep tracking and per-tick "already updated" marks
//!
//! Three bitsets over the grid:
//! - `current`: cells awake during the running tick (frozen when the tick starts)
//! - `next`: cells woken for the following tick, filled by `wake_area` calls
//! - `updated`: cells already processed this tick

const WORD_BITS: usize = 64;

#[derive(Clone, Debug)]
struct BitGrid {
    words: Vec<u64>,
    len: usize,
}

impl BitGrid {
    fn new(len: usize) -> Self {
        Self {
            words: vec![0; len.div_ceil(WORD_BITS)],
            len,
        }
    }

    #[inline]
    fn get(&self, idx: usize) -> bool {
        self.words[idx / WORD_BITS] & (1 << (idx % WORD_BITS)) != 0
    }

    #[inline]
    fn set(&mut self, idx: usize) {
        self.words[idx / WORD_BITS] |= 1 << (idx % WORD_BITS);
    }

    /// Set bits in [start, end)
    fn set_range(&mut self, start: usize, end: usize) {
        let mut idx = start;
        while idx < end {
            let bit = idx % WORD_BITS;
            let take = (WORD_BITS - bit).min(end - idx);
            let mask = if take == WORD_BITS {
                u64::MAX
            } else {
                ((1u64 << take) - 1) << bit
            };
            self.words[idx / WORD_BITS] |= mask;
            idx += take;
        }
    }

    /// Any bit set in [start, end)
    fn any_in_range(&self, start: usize, end: usize) -> bool {
        let mut idx = start;
        while idx < end {
            let bit = idx % WORD_BITS;
            let take = (WORD_BITS - bit).min(end - idx);
            let mask = if take == WORD_BITS {
                u64::MAX
            } else {
                ((1u64 << take) - 1) << bit
            };
            if self.words[idx / WORD_BITS] & mask != 0 {
                return true;
            }
            idx += take;
        }
        false
    }

    fn set_all(&mut self) {
        self.clear();
        self.set_range(0, self.len);
    }

    fn clear(&mut self) {
        self.words.fill(0);
    }

    fn count(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }
}

/// Activity map driving which cells the scheduler visits
#[derive(Clone, Debug)]
pub struct ActivityMap {
    width: usize,
    height: usize,
    wake_radius: usize,
    current: BitGrid,
    next: BitGrid,
    updated: BitGrid,
}

impl ActivityMap {
    /// New map with every cell woken for the first tick
    pub fn new(width: usize, height: usize, wake_radius: u8) -> Self {
        let len = width * height;
        let mut map = Self {
            width,
            height,
            wake_radius: usize::from(wake_radius),
            current: BitGrid::new(len),
            next: BitGrid::new(len),
            updated: BitGrid::new(len),
        };
        map.wake_all();
        map
    }

    /// Start a tick: what was woken last tick becomes the active set
    pub fn begin_tick(&mut self) {
        std::mem::swap(&mut self.current, &mut self.next);
        self.next.clear();
        self.updated.clear();
    }

    /// Awake during the running tick
    #[inline]
    pub fn is_active(&self, idx: usize) -> bool {
        self.current.get(idx)
    }

    /// Any awake cell in row `y` during the running tick
    #[inline]
    pub fn row_active(&self, y: usize) -> bool {
        let start = y * self.width;
        self.current.any_in_range(start, start + self.width)
    }

    /// Woken for the next tick
    #[inline]
    pub fn is_pending(&self, idx: usize) -> bool {
        self.next.get(idx)
    }

    #[inline]
    pub fn is_updated(&self, idx: usize) -> bool {
        self.updated.get(idx)
    }

    #[inline]
    pub fn mark_updated(&mut self, idx: usize) {
        self.updated.set(idx);
    }

    /// Wake a single cell for the next tick
    #[inline]
    pub fn wake(&mut self, idx: usize) {
        self.next.set(idx);
    }

    /// Wake (x, y) and every in-bounds cell within the wake radius for the next tick
    pub fn wake_area(&mut self, x: usize, y: usize) {
        let r = self.wake_radius;
        let min_x = x.saturating_sub(r);
        let max_x = (x + r).min(self.width - 1);
        let min_y = y.saturating_sub(r);
        let max_y = (y + r).min(self.height - 1);

        for ny in min_y..=max_y {
            let row = ny * self.width;
            self.next.set_range(row + min_x, row + max_x + 1);
        }
    }

    /// Wake the whole grid for the next tick
    pub fn wake_all(&mut self) {
        self.next.set_all();
    }

    /// Cells awake during the running (or last finished) tick
    pub fn active_count(&self) -> usize {
        self.current.count()
    }

    /// Cells woken for the next tick so far
    pub fn pending_count(&self) -> usize {
        self.next.count()
    }
}
