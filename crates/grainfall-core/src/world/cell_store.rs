//! CellStore - the grid's raw state in flat, parallel arrays
//!
//! One array per attribute instead of an array of cell structs, so a pass that
//! only reads material ids touches only material ids.

use grainfall_simulation::{EMPTY, MaterialId};

/// Raw per-cell storage, row-major (index = y * width + x).
///
/// Accessors take pre-validated coordinates; an out-of-bounds call is a bug in
/// the caller and panics on the array index. The facade is the layer that
/// validates.
#[derive(Clone, Debug)]
pub struct CellStore {
    width: usize,
    height: usize,

    /// Material id per cell (0 = empty)
    materials: Vec<MaterialId>,

    /// Heat per cell, unclamped
    temperature: Vec<f32>,

    /// Per-cell scratch value owned by the occupying material
    age: Vec<u16>,
}

impl CellStore {
    /// Allocate an empty grid at a uniform temperature
    pub fn new(width: usize, height: usize, ambient_temperature: f32) -> Self {
        debug_assert!(width > 0 && height > 0);
        let len = width * height;
        Self {
            width,
            height,
            materials: vec![EMPTY; len],
            temperature: vec![ambient_temperature; len],
            age: vec![0; len],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of cells
    #[inline]
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// Always false: a store has at least one cell
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Flat index of a validated coordinate
    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width && y < self.height);
        y * self.width + x
    }

    /// Flat index of a signed coordinate, or None outside the grid
    #[inline]
    pub fn checked_index(&self, x: i32, y: i32) -> Option<usize> {
        self.in_bounds(x, y)
            .then(|| self.index(x as usize, y as usize))
    }

    // === Coordinate accessors ===

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> MaterialId {
        self.materials[self.index(x, y)]
    }

    /// Replace the material. Age resets to 0, temperature is left as is.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, id: MaterialId) {
        let idx = self.index(x, y);
        self.set_at(idx, id);
    }

    #[inline]
    pub fn temp(&self, x: usize, y: usize) -> f32 {
        self.temperature[self.index(x, y)]
    }

    #[inline]
    pub fn set_temp(&mut self, x: usize, y: usize, temp: f32) {
        let idx = self.index(x, y);
        self.temperature[idx] = temp;
    }

    /// Additive, never clamps
    #[inline]
    pub fn add_temp(&mut self, x: usize, y: usize, delta: f32) {
        let idx = self.index(x, y);
        self.temperature[idx] += delta;
    }

    #[inline]
    pub fn age(&self, x: usize, y: usize) -> u16 {
        self.age[self.index(x, y)]
    }

    #[inline]
    pub fn set_age(&mut self, x: usize, y: usize, age: u16) {
        let idx = self.index(x, y);
        self.age[idx] = age;
    }

    // === Flat index accessors ===

    #[inline]
    pub fn material_at(&self, idx: usize) -> MaterialId {
        self.materials[idx]
    }

    #[inline]
    pub fn set_at(&mut self, idx: usize, id: MaterialId) {
        self.materials[idx] = id;
        self.age[idx] = 0;
    }

    #[inline]
    pub fn temp_at(&self, idx: usize) -> f32 {
        self.temperature[idx]
    }

    #[inline]
    pub fn set_temp_at(&mut self, idx: usize, temp: f32) {
        self.temperature[idx] = temp;
    }

    #[inline]
    pub fn add_temp_at(&mut self, idx: usize, delta: f32) {
        self.temperature[idx] += delta;
    }

    #[inline]
    pub fn age_at(&self, idx: usize) -> u16 {
        self.age[idx]
    }

    #[inline]
    pub fn set_age_at(&mut self, idx: usize, age: u16) {
        self.age[idx] = age;
    }

    /// Exchange every attribute of two cells
    #[inline]
    pub fn swap_cells(&mut self, a: usize, b: usize) {
        self.materials.swap(a, b);
        self.temperature.swap(a, b);
        self.age.swap(a, b);
    }

    // === Whole-grid access ===

    /// Material ids, row-major, for renderers and snapshots
    pub fn materials(&self) -> &[MaterialId] {
        &self.materials
    }

    pub fn temperatures(&self) -> &[f32] {
        &self.temperature
    }

    pub fn ages(&self) -> &[u16] {
        &self.age
    }

    /// Set every cell to `id` with age 0
    pub fn fill(&mut self, id: MaterialId) {
        self.materials.fill(id);
        self.age.fill(0);
    }

    /// Count non-empty cells
    pub fn count_non_empty(&self) -> usize {
        self.materials.iter().filter(|&&id| id != EMPTY).count()
    }

    /// Overwrite all arrays from equally sized slices
    pub(crate) fn load(&mut self, materials: &[MaterialId], temperature: &[f32], age: &[u16]) {
        self.materials.copy_from_slice(materials);
        self.temperature.copy_from_slice(temperature);
        self.age.copy_from_slice(age);
    }
}
