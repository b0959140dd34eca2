//! Circular brush applied by scenario strokes

use grainfall_core::prelude::*;

/// Paints a disc of one material. An eraser is a brush of [`EMPTY`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Brush {
    material: MaterialId,
}

impl Brush {
    pub fn new(material: MaterialId) -> Self {
        Self { material }
    }

    pub fn eraser() -> Self {
        Self::new(EMPTY)
    }

    pub fn material(&self) -> MaterialId {
        self.material
    }

    pub fn is_eraser(&self) -> bool {
        self.material == EMPTY
    }

    /// Label used in logs
    pub fn label<'a>(&self, registry: &'a MaterialRegistry) -> &'a str {
        if self.is_eraser() {
            return "eraser";
        }
        registry
            .get(self.material)
            .map_or("unknown", |def| def.name.as_str())
    }

    /// Paint a disc of `radius` around (x, y), clipped to the grid.
    /// Returns the cells written.
    pub fn apply(
        &self,
        world: &mut World,
        x: i32,
        y: i32,
        radius: u32,
    ) -> Result<usize, EngineError> {
        let radius = i32::try_from(radius).unwrap_or(i32::MAX);
        world.paint_circle(x, y, radius, self.material)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{STONE, demo_registry};

    fn world() -> World {
        World::new(EngineConfig::with_size(10, 10), demo_registry().unwrap()).unwrap()
    }

    #[test]
    fn test_paint_then_erase() {
        let mut world = world();

        let drawn = Brush::new(STONE).apply(&mut world, 5, 5, 2).unwrap();
        assert_eq!(drawn, 13);
        assert_eq!(world.get(5, 5).unwrap(), STONE);

        let erased = Brush::eraser().apply(&mut world, 5, 5, 1).unwrap();
        assert_eq!(erased, 5);
        assert_eq!(world.store().count_non_empty(), 8);
    }

    #[test]
    fn test_huge_radius_covers_grid() {
        let mut world = world();
        let drawn = Brush::new(STONE).apply(&mut world, 5, 5, u32::MAX).unwrap();
        assert_eq!(drawn, 100);
    }

    #[test]
    fn test_unknown_material_fails_without_painting() {
        let mut world = world();
        assert!(Brush::new(999).apply(&mut world, 1, 1, 1).is_err());
        assert_eq!(world.store().count_non_empty(), 0);
    }

    #[test]
    fn test_labels() {
        let registry = demo_registry().unwrap();
        assert_eq!(Brush::new(STONE).label(&registry), "stone");
        assert_eq!(Brush::eraser().label(&registry), "eraser");
        assert_eq!(Brush::new(999).label(&registry), "unknown");
    }
}
