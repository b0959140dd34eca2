//! WorldFacade - the only surface material rules touch the grid through
//!
//! Every call validates coordinates and silently rejects bad ones, so a faulty
//! rule cannot crash the tick loop. Writes keep the tick bookkeeping honest:
//! - `set` and `swap` mark every touched cell as updated for this tick
//! - every applied write wakes the touched cells' neighborhoods for the next tick

use grainfall_simulation::{
    CellWorld, EMPTY, MaterialId, MaterialRegistry, MaterialType, RuleRng,
};

use super::activity::ActivityMap;
use super::cell_store::CellStore;
use super::stats::SimStats;

/// Borrowed view of the world handed to material update functions
pub struct WorldFacade<'a> {
    pub(super) store: &'a mut CellStore,
    pub(super) activity: &'a mut ActivityMap,
    registry: &'a MaterialRegistry,
    rng: &'a mut dyn RuleRng,
    stats: &'a mut dyn SimStats,
    tick: u64,
}

impl<'a> WorldFacade<'a> {
    pub fn new(
        store: &'a mut CellStore,
        activity: &'a mut ActivityMap,
        registry: &'a MaterialRegistry,
        rng: &'a mut dyn RuleRng,
        stats: &'a mut dyn SimStats,
        tick: u64,
    ) -> Self {
        Self {
            store,
            activity,
            registry,
            rng,
            stats,
            tick,
        }
    }

    pub(super) fn stats(&mut self) -> &mut dyn SimStats {
        &mut *self.stats
    }

    /// Validated flat index; counts a rejection when out of bounds
    #[inline]
    fn checked(&mut self, x: i32, y: i32) -> Option<usize> {
        let idx = self.store.checked_index(x, y);
        if idx.is_none() {
            log::trace!("Rejected facade access at ({}, {})", x, y);
            self.stats.record_rejected();
        }
        idx
    }

    #[inline]
    fn wake_around(&mut self, x: i32, y: i32) {
        self.activity.wake_area(x as usize, y as usize);
    }
}

impl CellWorld for WorldFacade<'_> {
    fn width(&self) -> i32 {
        self.store.width() as i32
    }

    fn height(&self) -> i32 {
        self.store.height() as i32
    }

    fn in_bounds(&self, x: i32, y: i32) -> bool {
        self.store.in_bounds(x, y)
    }

    fn get(&self, x: i32, y: i32) -> MaterialId {
        self.store
            .checked_index(x, y)
            .map_or(EMPTY, |idx| self.store.material_at(idx))
    }

    fn is_empty(&self, x: i32, y: i32) -> bool {
        self.store
            .checked_index(x, y)
            .is_some_and(|idx| self.store.material_at(idx) == EMPTY)
    }

    fn temp(&self, x: i32, y: i32) -> f32 {
        self.store
            .checked_index(x, y)
            .map_or(0.0, |idx| self.store.temp_at(idx))
    }

    fn age(&self, x: i32, y: i32) -> u16 {
        self.store
            .checked_index(x, y)
            .map_or(0, |idx| self.store.age_at(idx))
    }

    fn density(&self, id: MaterialId) -> Option<f32> {
        self.registry.density(id)
    }

    fn material_type(&self, id: MaterialId) -> Option<MaterialType> {
        self.registry.get(id).map(|m| m.material_type)
    }

    fn tick(&self) -> u64 {
        self.tick
    }

    fn set(&mut self, x: i32, y: i32, id: MaterialId) -> bool {
        let Some(idx) = self.checked(x, y) else {
            return false;
        };
        if id != EMPTY && !self.registry.contains(id) {
            log::trace!("Rejected set of unknown material {} at ({}, {})", id, x, y);
            self.stats.record_rejected();
            return false;
        }

        self.store.set_at(idx, id);
        self.activity.mark_updated(idx);
        self.wake_around(x, y);
        self.stats.record_set();
        true
    }

    fn set_temp(&mut self, x: i32, y: i32, temp: f32) -> bool {
        let Some(idx) = self.checked(x, y) else {
            return false;
        };
        if self.store.temp_at(idx) != temp {
            self.store.set_temp_at(idx, temp);
            self.wake_around(x, y);
        }
        true
    }

    fn add_temp(&mut self, x: i32, y: i32, delta: f32) -> bool {
        let Some(idx) = self.checked(x, y) else {
            return false;
        };
        if delta != 0.0 {
            self.store.add_temp_at(idx, delta);
            self.wake_around(x, y);
        }
        true
    }

    fn set_age(&mut self, x: i32, y: i32, age: u16) -> bool {
        let Some(idx) = self.checked(x, y) else {
            return false;
        };
        if self.store.age_at(idx) != age {
            self.store.set_age_at(idx, age);
            self.wake_around(x, y);
        }
        true
    }

    fn swap(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) -> bool {
        // Validate both ends before touching either
        let (Some(a), Some(b)) = (
            self.store.checked_index(x1, y1),
            self.store.checked_index(x2, y2),
        ) else {
            log::trace!("Rejected swap ({}, {}) <-> ({}, {})", x1, y1, x2, y2);
            self.stats.record_rejected();
            return false;
        };

        self.store.swap_cells(a, b);
        self.activity.mark_updated(a);
        self.activity.mark_updated(b);
        self.wake_around(x1, y1);
        self.wake_around(x2, y2);
        self.stats.record_move();
        true
    }

    fn mark_updated(&mut self, x: i32, y: i32) {
        if let Some(idx) = self.checked(x, y) {
            self.activity.mark_updated(idx);
        }
    }

    fn wake_area(&mut self, x: i32, y: i32) {
        if self.checked(x, y).is_some() {
            self.wake_around(x, y);
        }
    }

    fn rng(&mut self) -> &mut dyn RuleRng {
        &mut *self.rng
    }
}
