//! Scheduler - advances the grid one tick at a time
//!
//! Only cells woken during the previous tick are visited. A cell is dispatched
//! at most once per tick: moving a grain into a cell the traversal has not
//! reached yet marks that cell updated, so the grain is not processed twice.

use grainfall_simulation::{EMPTY, MaterialRegistry, RuleRng};

use super::activity::ActivityMap;
use super::cell_store::CellStore;
use super::facade::WorldFacade;
use super::stats::SimStats;
use crate::config::ScanOrder;

pub struct Scheduler {
    activity: ActivityMap,
    scan_order: ScanOrder,
    tick: u64,
}

impl Scheduler {
    pub fn new(width: usize, height: usize, scan_order: ScanOrder, wake_radius: u8) -> Self {
        Self {
            activity: ActivityMap::new(width, height, wake_radius),
            scan_order,
            tick: 0,
        }
    }

    /// Ticks run so far
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn scan_order(&self) -> ScanOrder {
        self.scan_order
    }

    pub fn activity(&self) -> &ActivityMap {
        &self.activity
    }

    pub fn activity_mut(&mut self) -> &mut ActivityMap {
        &mut self.activity
    }

    /// Run one tick over `store`
    pub fn step(
        &mut self,
        store: &mut CellStore,
        registry: &MaterialRegistry,
        rng: &mut dyn RuleRng,
        stats: &mut dyn SimStats,
    ) {
        self.tick += 1;
        self.activity.begin_tick();

        let width = store.width();
        let height = store.height();
        let tick = self.tick;
        let scan_order = self.scan_order;

        let mut world = WorldFacade::new(store, &mut self.activity, registry, rng, stats, tick);

        for row in 0..height {
            let y = match scan_order {
                ScanOrder::BottomUpAlternating => height - 1 - row,
                ScanOrder::RowMajor => row,
            };

            if !world.activity.row_active(y) {
                continue;
            }

            // Alternate direction per row and per tick to cancel sideways bias
            let reverse = scan_order == ScanOrder::BottomUpAlternating
                && (row as u64 + tick) % 2 == 1;

            for i in 0..width {
                let x = if reverse { width - 1 - i } else { i };
                process_cell(&mut world, registry, x, y);
            }
        }
    }
}

#[inline]
fn process_cell(world: &mut WorldFacade<'_>, registry: &MaterialRegistry, x: usize, y: usize) {
    let idx = world.store.index(x, y);
    if !world.activity.is_active(idx) {
        return;
    }
    world.stats().record_visit();

    if world.activity.is_updated(idx) {
        world.stats().record_skip_updated();
        return;
    }

    let id = world.store.material_at(idx);
    if id == EMPTY {
        return;
    }

    let Some(def) = registry.get(id) else {
        log::error!("Cell ({}, {}) holds unregistered material {}, skipping", x, y, id);
        return;
    };

    world.stats().record_dispatch();
    def.update(x as i32, y as i32, world);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::stats::TickCounters;
    use grainfall_simulation::{CellWorld, MaterialDef, MaterialId, MaterialType};
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;

    const SAND: MaterialId = 1;
    const COUNTER: MaterialId = 2;

    fn falling(x: i32, y: i32, world: &mut dyn CellWorld) {
        if world.is_empty(x, y + 1) {
            world.swap(x, y, x, y + 1);
        }
    }

    fn count_age(x: i32, y: i32, world: &mut dyn CellWorld) {
        let age = world.age(x, y);
        world.set_age(x, y, age.saturating_add(1));
    }

    fn registry() -> MaterialRegistry {
        MaterialRegistry::builder()
            .register(
                MaterialDef::new(SAND, "sand", MaterialType::Powder, 1.5).with_update(falling),
            )
            .unwrap()
            .register(
                MaterialDef::new(COUNTER, "counter", MaterialType::Solid, f32::INFINITY)
                    .with_update(count_age),
            )
            .unwrap()
            .build()
    }

    fn run(
        scheduler: &mut Scheduler,
        store: &mut CellStore,
        registry: &MaterialRegistry,
        rng: &mut Xoshiro256StarStar,
    ) -> TickCounters {
        let mut stats = TickCounters::default();
        scheduler.step(store, registry, rng, &mut stats);
        stats
    }

    #[test]
    fn test_grain_falls_once_per_tick_in_both_orders() {
        let registry = registry();
        for order in [ScanOrder::BottomUpAlternating, ScanOrder::RowMajor] {
            let mut store = CellStore::new(3, 6, 20.0);
            let mut scheduler = Scheduler::new(3, 6, order, 1);
            let mut rng = Xoshiro256StarStar::seed_from_u64(0);
            store.set(1, 0, SAND);

            run(&mut scheduler, &mut store, &registry, &mut rng);
            assert_eq!(store.get(1, 1), SAND, "{order:?}");
            assert_eq!(store.count_non_empty(), 1);

            run(&mut scheduler, &mut store, &registry, &mut rng);
            assert_eq!(store.get(1, 2), SAND, "{order:?}");
        }
    }

    #[test]
    fn test_row_major_skips_moved_grain() {
        let registry = registry();
        let mut store = CellStore::new(1, 4, 20.0);
        let mut scheduler = Scheduler::new(1, 4, ScanOrder::RowMajor, 1);
        let mut rng = Xoshiro256StarStar::seed_from_u64(0);
        store.set(0, 0, SAND);

        let stats = run(&mut scheduler, &mut store, &registry, &mut rng);

        assert_eq!(store.get(0, 1), SAND);
        assert_eq!(stats.dispatched, 1);
        assert_eq!(stats.skipped_updated, 1);
        assert_eq!(stats.moves, 1);
    }

    #[test]
    fn test_each_cell_dispatched_at_most_once() {
        let registry = registry();
        let mut store = CellStore::new(4, 4, 20.0);
        store.fill(COUNTER);
        let mut scheduler = Scheduler::new(4, 4, ScanOrder::BottomUpAlternating, 1);
        let mut rng = Xoshiro256StarStar::seed_from_u64(0);

        let stats = run(&mut scheduler, &mut store, &registry, &mut rng);

        assert_eq!(stats.dispatched, 16);
        assert!(store.ages().iter().all(|&age| age == 1));
    }

    #[test]
    fn test_settled_grid_falls_asleep() {
        let registry = registry();
        let mut store = CellStore::new(5, 5, 20.0);
        let mut scheduler = Scheduler::new(5, 5, ScanOrder::BottomUpAlternating, 1);
        let mut rng = Xoshiro256StarStar::seed_from_u64(0);
        store.set(2, 4, SAND);

        // First tick visits everything, nothing moves
        let first = run(&mut scheduler, &mut store, &registry, &mut rng);
        assert_eq!(first.visited, 25);
        assert_eq!(first.moves, 0);

        let second = run(&mut scheduler, &mut store, &registry, &mut rng);
        assert_eq!(second.visited, 0);
        assert_eq!(scheduler.activity().active_count(), 0);
    }

    #[test]
    fn test_moves_keep_neighborhood_awake() {
        let registry = registry();
        let mut store = CellStore::new(5, 5, 20.0);
        let mut scheduler = Scheduler::new(5, 5, ScanOrder::BottomUpAlternating, 1);
        let mut rng = Xoshiro256StarStar::seed_from_u64(0);
        store.set(2, 0, SAND);

        run(&mut scheduler, &mut store, &registry, &mut rng);
        // (2,0) and (2,1) woke their 3x3 areas: rows 0..=2, columns 1..=3
        assert_eq!(scheduler.activity().pending_count(), 9);

        run(&mut scheduler, &mut store, &registry, &mut rng);
        assert_eq!(store.get(2, 2), SAND);
    }

    #[test]
    fn test_wake_from_outside_restarts_sleeping_cells() {
        let registry = registry();
        let mut store = CellStore::new(3, 3, 20.0);
        let mut scheduler = Scheduler::new(3, 3, ScanOrder::RowMajor, 1);
        let mut rng = Xoshiro256StarStar::seed_from_u64(0);

        run(&mut scheduler, &mut store, &registry, &mut rng);
        run(&mut scheduler, &mut store, &registry, &mut rng);
        assert_eq!(scheduler.activity().active_count(), 0);

        store.set(1, 0, SAND);
        scheduler.activity_mut().wake_area(1, 0);
        run(&mut scheduler, &mut store, &registry, &mut rng);
        assert_eq!(store.get(1, 1), SAND);
    }

    #[test]
    fn test_unregistered_material_is_skipped() {
        let registry = registry();
        let mut store = CellStore::new(2, 2, 20.0);
        store.set(0, 0, 77);
        let mut scheduler = Scheduler::new(2, 2, ScanOrder::RowMajor, 1);
        let mut rng = Xoshiro256StarStar::seed_from_u64(0);

        let stats = run(&mut scheduler, &mut store, &registry, &mut rng);

        assert_eq!(stats.dispatched, 0);
        assert_eq!(store.get(0, 0), 77);
    }

    #[test]
    fn test_tick_counter_advances() {
        let registry = registry();
        let mut store = CellStore::new(2, 2, 20.0);
        let mut scheduler = Scheduler::new(2, 2, ScanOrder::RowMajor, 1);
        let mut rng = Xoshiro256StarStar::seed_from_u64(0);

        assert_eq!(scheduler.tick(), 0);
        for _ in 0..3 {
            run(&mut scheduler, &mut store, &registry, &mut rng);
        }
        assert_eq!(scheduler.tick(), 3);
    }
}
