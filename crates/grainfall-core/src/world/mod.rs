//! World management - cell storage, tick scheduling, undo history

mod activity;
mod cell_store;
mod facade;
mod history;
mod scheduler;
mod snapshot;
pub mod stats;
#[allow(clippy::module_inception)]
mod world;

pub use activity::ActivityMap;
pub use cell_store::CellStore;
pub use facade::WorldFacade;
pub use history::{DEFAULT_HISTORY_CAPACITY, HistoryManager};
pub use scheduler::Scheduler;
pub use snapshot::Snapshot;
pub use stats::{NoopStats, SimStats, TickCounters};
pub use world::World;
