//! # Grainfall - headless falling-sand scenario runner
//!
//! Loads a RON scenario, paints scripted brush strokes into a world built from
//! a small demo catalog, simulates it, and optionally walks the undo history
//! and saves the final grid.

pub mod app;
pub mod brush;
pub mod catalog;
pub mod config;

pub use app::{App, RunSummary};
pub use config::ScenarioConfig;
