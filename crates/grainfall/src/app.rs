//! Headless scenario runner

use anyhow::{Context, Result};
use std::path::Path;

use grainfall_core::prelude::*;

use crate::brush::Brush;
use crate::catalog::demo_registry;
use crate::config::{ScenarioConfig, Stroke, ToolKind};

/// A stroke with its material resolved against the registry
struct PlannedStroke {
    at_tick: u64,
    brush: Brush,
    x: i32,
    y: i32,
    radius: u32,
}

/// Outcome of a finished run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub ticks: u64,
    pub strokes_applied: usize,
    pub undos_applied: usize,
    pub redos_applied: usize,
    pub non_empty_cells: usize,
}

/// Main application state
pub struct App {
    world: World,
    strokes: Vec<PlannedStroke>,
    ticks: u64,
    undo_steps: usize,
    redo_steps: usize,
    report_every: u64,
}

impl App {
    /// Build the world and resolve every stroke's material up front
    pub fn new(scenario: ScenarioConfig) -> Result<Self> {
        let registry = demo_registry().context("Failed to build material catalog")?;

        let mut strokes = scenario
            .strokes
            .iter()
            .map(|stroke| plan_stroke(stroke, &registry))
            .collect::<Result<Vec<_>>>()?;
        // Stable sort keeps file order within a tick
        strokes.sort_by_key(|stroke| stroke.at_tick);

        let world = World::new(scenario.engine, registry).context("Failed to create world")?;

        Ok(Self {
            world,
            strokes,
            ticks: scenario.ticks,
            undo_steps: scenario.undo_steps,
            redo_steps: scenario.redo_steps,
            report_every: scenario.report_every,
        })
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Simulate every tick, applying strokes as their tick comes up, then
    /// walk the undo history as configured
    pub fn run(&mut self) -> Result<RunSummary> {
        // Baseline so the first stroke can be undone
        self.world.push_snapshot();

        let strokes = std::mem::take(&mut self.strokes);
        let mut pending = strokes.iter().peekable();
        let mut strokes_applied = 0;

        for tick in 0..self.ticks {
            while let Some(stroke) = pending.next_if(|s| s.at_tick <= tick) {
                self.apply_stroke(stroke)?;
                strokes_applied += 1;
            }

            self.world.step();

            if self.report_every > 0 && (tick + 1) % self.report_every == 0 {
                let stats = self.world.last_tick_stats();
                log::info!(
                    "Tick {}: {} active, {} dispatched, {} moves, {} non-empty",
                    self.world.tick_count(),
                    self.world.active_cells(),
                    stats.dispatched,
                    stats.moves,
                    self.world.store().count_non_empty()
                );
            }
        }

        for stroke in pending {
            log::warn!(
                "Stroke at tick {} is past the last tick {}, applying at the end",
                stroke.at_tick,
                self.ticks
            );
            self.apply_stroke(stroke)?;
            strokes_applied += 1;
        }
        self.strokes = strokes;

        let mut undos_applied = 0;
        for _ in 0..self.undo_steps {
            if !self.world.undo()? {
                log::warn!("Nothing left to undo after {} step(s)", undos_applied);
                break;
            }
            undos_applied += 1;
        }

        let mut redos_applied = 0;
        for _ in 0..self.redo_steps {
            if !self.world.redo()? {
                log::warn!("Nothing left to redo after {} step(s)", redos_applied);
                break;
            }
            redos_applied += 1;
        }

        let summary = RunSummary {
            ticks: self.world.tick_count(),
            strokes_applied,
            undos_applied,
            redos_applied,
            non_empty_cells: self.world.store().count_non_empty(),
        };
        log::info!("Finished: {:?}", summary);
        Ok(summary)
    }

    /// Write the current grid as a compressed snapshot
    pub fn save(&self, path: &Path) -> Result<()> {
        let bytes = self
            .world
            .snapshot()
            .to_bytes()
            .context("Failed to encode snapshot")?;
        std::fs::write(path, &bytes)
            .with_context(|| format!("Failed to write snapshot: {}", path.display()))?;
        log::info!("Saved {} bytes to {}", bytes.len(), path.display());
        Ok(())
    }

    /// Apply one stroke and commit the result as an undo step
    fn apply_stroke(&mut self, stroke: &PlannedStroke) -> Result<()> {
        let written = stroke
            .brush
            .apply(&mut self.world, stroke.x, stroke.y, stroke.radius)
            .with_context(|| format!("Stroke at ({}, {}) failed", stroke.x, stroke.y))?;
        log::debug!(
            "{} at ({}, {}) r={} wrote {} cells",
            stroke.brush.label(self.world.registry()),
            stroke.x,
            stroke.y,
            stroke.radius,
            written
        );
        self.world.push_snapshot();
        Ok(())
    }
}

fn plan_stroke(stroke: &Stroke, registry: &MaterialRegistry) -> Result<PlannedStroke> {
    let brush = match &stroke.tool {
        ToolKind::Pen(name) => registry
            .by_name(name)
            .map(Brush::new)
            .with_context(|| format!("Unknown material in stroke: {}", name))?,
        ToolKind::Erase => Brush::eraser(),
    };

    Ok(PlannedStroke {
        at_tick: stroke.at_tick,
        brush,
        x: stroke.x,
        y: stroke.y,
        radius: stroke.radius,
    })
}
