//! # Grainfall core - grid engine for a 2D falling-sand automaton
//!
//! Owns the cell arrays, drives one tick at a time over the active cells,
//! and keeps a bounded undo/redo history of whole-grid snapshots.

pub mod config;
mod error;
pub mod world;

pub use config::{EngineConfig, ScanOrder};
pub use error::EngineError;

/// Common imports for hosts and material catalogs
pub mod prelude {
    pub use crate::config::{EngineConfig, ScanOrder};
    pub use crate::error::EngineError;
    pub use crate::world::{HistoryManager, Snapshot, World};
    pub use grainfall_simulation::{
        CellWorld, EMPTY, MaterialDef, MaterialId, MaterialRegistry, MaterialType, RuleRng,
    };
}
