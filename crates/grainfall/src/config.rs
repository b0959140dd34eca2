//! Scenario configuration for the Grainfall runner

use anyhow::{Context, Result};
use grainfall_core::EngineConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Which brush a stroke uses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ToolKind {
    /// Paint the named material
    Pen(String),
    /// Clear to empty
    Erase,
}

/// One brush application at a given tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    /// Applied before this tick runs
    pub at_tick: u64,
    pub tool: ToolKind,
    pub x: i32,
    pub y: i32,
    /// Brush radius in cells
    #[serde(default = "default_radius")]
    pub radius: u32,
}

fn default_radius() -> u32 {
    3
}

/// A scripted headless run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    /// Engine parameters (grid size, seed, history capacity, ...)
    pub engine: EngineConfig,
    /// Ticks to simulate
    pub ticks: u64,
    /// Brush strokes, each committed as an undo step
    pub strokes: Vec<Stroke>,
    /// Undo steps to apply after the last tick
    pub undo_steps: usize,
    /// Redo steps to apply after undoing
    pub redo_steps: usize,
    /// Where to write the final grid snapshot
    pub save_path: Option<PathBuf>,
    /// Log tick statistics every N ticks (0 = never)
    pub report_every: u64,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        let pen = |at_tick, material: &str, x, y, radius| Stroke {
            at_tick,
            tool: ToolKind::Pen(material.to_string()),
            x,
            y,
            radius,
        };

        Self {
            engine: EngineConfig::with_size(128, 96),
            ticks: 300,
            strokes: vec![
                pen(0, "stone", 64, 92, 30),
                pen(0, "wood", 96, 60, 5),
                pen(5, "sand", 40, 10, 6),
                pen(20, "water", 80, 10, 8),
                pen(60, "fire", 96, 53, 2),
            ],
            undo_steps: 0,
            redo_steps: 0,
            save_path: None,
            report_every: 50,
        }
    }
}

impl ScenarioConfig {
    /// Load scenario from RON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario file: {}", path.display()))?;

        Self::from_ron_str(&content)
            .with_context(|| format!("Failed to parse RON scenario: {}", path.display()))
    }

    pub fn from_ron_str(source: &str) -> Result<Self> {
        let scenario: Self = ron::from_str(source)?;
        scenario.engine.validate()?;
        Ok(scenario)
    }

    pub fn to_ron_string(&self) -> Result<String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .context("Failed to serialize scenario to RON")
    }
}
