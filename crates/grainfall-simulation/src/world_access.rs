//! The facade material rules use to read and change the world

use crate::materials::{MaterialId, MaterialType};
use crate::rng::RuleRng;

/// Query and mutation surface exposed to material update functions.
///
/// Every call is safe with any coordinates: queries outside the grid return a
/// sentinel and mutations outside the grid are rejected without touching
/// anything. Mutators return `true` when the change was applied.
///
/// Out-of-bounds sentinels:
/// - `get` returns [`EMPTY`](crate::EMPTY)
/// - `is_empty` returns `false`, so the border behaves like a wall
/// - `temp` returns `0.0` and `age` returns `0`
pub trait CellWorld {
    /// Grid width in cells
    fn width(&self) -> i32;

    /// Grid height in cells
    fn height(&self) -> i32;

    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width() && y < self.height()
    }

    /// Material id at (x, y)
    fn get(&self, x: i32, y: i32) -> MaterialId;

    /// True only for in-bounds cells holding empty space
    fn is_empty(&self, x: i32, y: i32) -> bool;

    fn temp(&self, x: i32, y: i32) -> f32;

    fn age(&self, x: i32, y: i32) -> u16;

    /// Density of a registered material (None for empty and unknown ids)
    fn density(&self, id: MaterialId) -> Option<f32>;

    /// Physical class of a registered material
    fn material_type(&self, id: MaterialId) -> Option<MaterialType>;

    /// Number of the tick currently running
    fn tick(&self) -> u64;

    /// Replace the material at (x, y). Resets age to 0; temperature is kept.
    /// Unregistered nonzero ids are rejected.
    fn set(&mut self, x: i32, y: i32, id: MaterialId) -> bool;

    fn set_temp(&mut self, x: i32, y: i32, temp: f32) -> bool;

    /// Add `delta` to the temperature at (x, y). Never clamps.
    fn add_temp(&mut self, x: i32, y: i32, delta: f32) -> bool;

    fn set_age(&mut self, x: i32, y: i32, age: u16) -> bool;

    /// Exchange material, temperature and age between two cells.
    /// Rejected as a whole if either cell is out of bounds.
    fn swap(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) -> bool;

    /// Flag (x, y) as processed so the current tick does not visit it again
    fn mark_updated(&mut self, x: i32, y: i32);

    /// Keep (x, y) and its neighborhood awake for the next tick
    fn wake_area(&mut self, x: i32, y: i32);

    /// Random source for stochastic rules
    fn rng(&mut self) -> &mut dyn RuleRng;

    /// Draw a uniform value and compare it to `probability`
    fn chance(&mut self, probability: f32) -> bool {
        self.rng().check_probability(probability)
    }
}
