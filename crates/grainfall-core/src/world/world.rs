//! World - the host-facing aggregate of grid, scheduler and history

use grainfall_simulation::{CellWorld, EMPTY, MaterialId, MaterialRegistry};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;

use super::activity::ActivityMap;
use super::cell_store::CellStore;
use super::facade::WorldFacade;
use super::history::HistoryManager;
use super::scheduler::Scheduler;
use super::snapshot::Snapshot;
use super::stats::{NoopStats, TickCounters};
use crate::config::EngineConfig;
use crate::error::EngineError;

/// A fixed-size falling-sand grid with its material catalog
pub struct World {
    config: EngineConfig,

    /// Raw cell arrays
    store: CellStore,

    /// Material definitions, fixed for the lifetime of the world
    registry: MaterialRegistry,

    /// Tick driver and activity map
    scheduler: Scheduler,

    /// Undo/redo timeline, driven by the host
    history: HistoryManager,

    /// Random source handed to material rules
    rng: Xoshiro256StarStar,

    /// Counters of the most recent tick
    last_tick: TickCounters,
}

impl World {
    pub fn new(config: EngineConfig, registry: MaterialRegistry) -> Result<Self, EngineError> {
        config.validate()?;

        log::info!(
            "Creating {}x{} world with {} materials (seed {}, {:?})",
            config.width,
            config.height,
            registry.len(),
            config.seed,
            config.scan_order
        );

        Ok(Self {
            store: CellStore::new(config.width, config.height, config.ambient_temperature),
            scheduler: Scheduler::new(
                config.width,
                config.height,
                config.scan_order,
                config.wake_radius,
            ),
            history: HistoryManager::new(config.history_capacity),
            rng: Xoshiro256StarStar::seed_from_u64(config.seed),
            last_tick: TickCounters::default(),
            registry,
            config,
        })
    }

    // === Simulation ===

    /// Advance the simulation by one tick
    pub fn step(&mut self) {
        self.last_tick.reset();
        self.scheduler.step(
            &mut self.store,
            &self.registry,
            &mut self.rng,
            &mut self.last_tick,
        );
    }

    pub fn step_n(&mut self, ticks: u64) {
        for _ in 0..ticks {
            self.step();
        }
    }

    /// Ticks run since creation
    pub fn tick_count(&self) -> u64 {
        self.scheduler.tick()
    }

    /// Cells awake during the last tick
    pub fn active_cells(&self) -> usize {
        self.scheduler.activity().active_count()
    }

    /// Cells already woken for the next tick
    pub fn pending_cells(&self) -> usize {
        self.scheduler.activity().pending_count()
    }

    pub fn last_tick_stats(&self) -> &TickCounters {
        &self.last_tick
    }

    /// Wake every cell for the next tick
    pub fn wake_all(&mut self) {
        self.scheduler.activity_mut().wake_all();
    }

    // === Accessors ===

    pub fn width(&self) -> usize {
        self.store.width()
    }

    pub fn height(&self) -> usize {
        self.store.height()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn registry(&self) -> &MaterialRegistry {
        &self.registry
    }

    /// Raw cell arrays, for rendering
    pub fn store(&self) -> &CellStore {
        &self.store
    }

    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    // === Host edits ===

    fn checked(&self, x: i32, y: i32) -> Result<(usize, usize), EngineError> {
        if self.store.in_bounds(x, y) {
            Ok((x as usize, y as usize))
        } else {
            Err(EngineError::OutOfBounds {
                x,
                y,
                width: self.store.width(),
                height: self.store.height(),
            })
        }
    }

    fn check_material(&self, id: MaterialId) -> Result<(), EngineError> {
        if id == EMPTY || self.registry.contains(id) {
            Ok(())
        } else {
            Err(EngineError::UnknownMaterial { id })
        }
    }

    pub fn get(&self, x: i32, y: i32) -> Result<MaterialId, EngineError> {
        let (x, y) = self.checked(x, y)?;
        Ok(self.store.get(x, y))
    }

    /// Place a material and wake its neighborhood. Age resets to 0.
    pub fn set(&mut self, x: i32, y: i32, id: MaterialId) -> Result<(), EngineError> {
        let (x, y) = self.checked(x, y)?;
        self.check_material(id)?;
        self.store.set(x, y, id);
        self.scheduler.activity_mut().wake_area(x, y);
        Ok(())
    }

    pub fn temp(&self, x: i32, y: i32) -> Result<f32, EngineError> {
        let (x, y) = self.checked(x, y)?;
        Ok(self.store.temp(x, y))
    }

    pub fn set_temp(&mut self, x: i32, y: i32, temp: f32) -> Result<(), EngineError> {
        let (x, y) = self.checked(x, y)?;
        self.store.set_temp(x, y, temp);
        self.scheduler.activity_mut().wake_area(x, y);
        Ok(())
    }

    pub fn age(&self, x: i32, y: i32) -> Result<u16, EngineError> {
        let (x, y) = self.checked(x, y)?;
        Ok(self.store.age(x, y))
    }

    pub fn set_age(&mut self, x: i32, y: i32, age: u16) -> Result<(), EngineError> {
        let (x, y) = self.checked(x, y)?;
        self.store.set_age(x, y, age);
        self.scheduler.activity_mut().wake_area(x, y);
        Ok(())
    }

    /// Fill a disc with `id`, clipped to the grid. Returns the number of cells written.
    pub fn paint_circle(
        &mut self,
        center_x: i32,
        center_y: i32,
        radius: i32,
        id: MaterialId,
    ) -> Result<usize, EngineError> {
        self.check_material(id)?;

        let radius = i64::from(radius.max(0));
        let radius_sq = radius * radius;
        let (cx, cy) = (i64::from(center_x), i64::from(center_y));

        // Only visit rows and columns that can land on the grid
        let min_y = (cy - radius).max(0);
        let max_y = (cy + radius).min(self.store.height() as i64 - 1);
        let min_x = (cx - radius).max(0);
        let max_x = (cx + radius).min(self.store.width() as i64 - 1);

        let mut painted = 0;
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let (dx, dy) = (x - cx, y - cy);
                if dx * dx + dy * dy > radius_sq {
                    continue;
                }
                let (x, y) = (x as usize, y as usize);
                self.store.set(x, y, id);
                self.scheduler.activity_mut().wake_area(x, y);
                painted += 1;
            }
        }

        Ok(painted)
    }

    /// Run `f` against the same facade material rules see
    ///
    /// Out-of-bounds calls are silently rejected, as they are for rules.
    pub fn edit<R>(&mut self, f: impl FnOnce(&mut dyn CellWorld) -> R) -> R {
        let tick = self.scheduler.tick();
        let mut stats = NoopStats;
        let mut facade = WorldFacade::new(
            &mut self.store,
            self.scheduler.activity_mut(),
            &self.registry,
            &mut self.rng,
            &mut stats,
            tick,
        );
        let world: &mut dyn CellWorld = &mut facade;
        f(world)
    }

    // === Snapshots and history ===

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.store)
    }

    /// Replace the grid with `snapshot` and wake everything
    ///
    /// Fails without touching the grid if the snapshot holds a material id
    /// this world's registry does not know.
    pub fn restore(&mut self, snapshot: &Snapshot) -> Result<(), EngineError> {
        if let Some(&id) = snapshot
            .materials()
            .iter()
            .find(|&&id| id != EMPTY && !self.registry.contains(id))
        {
            return Err(EngineError::UnknownMaterial { id });
        }
        apply_snapshot(snapshot, &mut self.store, self.scheduler.activity_mut())
    }

    /// Commit the current grid to the undo timeline
    pub fn push_snapshot(&mut self) {
        self.history.push_snapshot(Snapshot::capture(&self.store));
    }

    /// Restore the previous committed state. Returns false when there is none.
    pub fn undo(&mut self) -> Result<bool, EngineError> {
        let Some(snapshot) = self.history.undo() else {
            return Ok(false);
        };
        apply_snapshot(snapshot, &mut self.store, self.scheduler.activity_mut())?;
        Ok(true)
    }

    /// Re-apply the next committed state. Returns false when there is none.
    pub fn redo(&mut self) -> Result<bool, EngineError> {
        let Some(snapshot) = self.history.redo() else {
            return Ok(false);
        };
        apply_snapshot(snapshot, &mut self.store, self.scheduler.activity_mut())?;
        Ok(true)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}

fn apply_snapshot(
    snapshot: &Snapshot,
    store: &mut CellStore,
    activity: &mut ActivityMap,
) -> Result<(), EngineError> {
    snapshot.apply_to(store)?;
    activity.wake_all();
    log::debug!(
        "Restored {}x{} snapshot",
        snapshot.width(),
        snapshot.height()
    );
    Ok(())
}
