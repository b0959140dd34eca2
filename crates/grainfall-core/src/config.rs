//! Engine configuration - serializable parameters fixed at world creation
//!
//! Loadable from RON so hosts can keep presets next to their scenarios.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::world::DEFAULT_HISTORY_CAPACITY;

/// Order in which the scheduler visits active cells within one tick.
/// Both orders are fixed for a given tick number, so runs are reproducible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScanOrder {
    /// Rows from bottom to top so falling works in one pass. The x direction
    /// alternates per row and flips every tick to avoid a sideways drift.
    #[default]
    BottomUpAlternating,
    /// Top-left to bottom-right, row by row
    RowMajor,
}

/// Complete engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Grid width in cells
    pub width: usize,
    /// Grid height in cells
    pub height: usize,
    /// Undo steps kept by the history (default: 20)
    pub history_capacity: usize,
    /// Initial temperature of every cell (default: 20.0)
    pub ambient_temperature: f32,
    /// Seed for the random source handed to material rules
    pub seed: u64,
    /// Cell visiting order
    pub scan_order: ScanOrder,
    /// Chebyshev radius woken around a changed cell (default: 1 = 3x3)
    pub wake_radius: u8,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: 256,
            height: 256,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            ambient_temperature: 20.0,
            seed: 42,
            scan_order: ScanOrder::default(),
            wake_radius: 1,
        }
    }
}

impl EngineConfig {
    /// Default configuration with the given grid size
    pub fn with_size(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Parse a RON document. Missing fields take their defaults.
    pub fn from_ron_str(source: &str) -> Result<Self, EngineError> {
        let config: Self = ron::from_str(source).map_err(|e| EngineError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_ron_string(&self) -> Result<String, EngineError> {
        ron::ser::to_string_pretty(self, Default::default())
            .map_err(|e| EngineError::Config(e.to_string()))
    }

    /// Reject configurations the engine cannot allocate or index
    pub fn validate(&self) -> Result<(), EngineError> {
        let invalid = EngineError::InvalidDimensions {
            width: self.width,
            height: self.height,
        };

        if self.width == 0 || self.height == 0 {
            return Err(invalid);
        }

        // Facade coordinates are i32
        if self.width > i32::MAX as usize || self.height > i32::MAX as usize {
            return Err(invalid);
        }
        if self.width.checked_mul(self.height).is_none() {
            return Err(invalid);
        }

        if !self.ambient_temperature.is_finite() {
            return Err(EngineError::Config(format!(
                "ambient_temperature must be finite, got {}",
                self.ambient_temperature
            )));
        }

        Ok(())
    }

    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }
}
