//! Material definitions and registry

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::color::pack_rgba;
use crate::error::RegistryError;
use crate::world_access::CellWorld;

/// Numeric material identifier stored in every cell (0 = empty space)
pub type MaterialId = u16;

/// Reserved id for empty space. Never registered, never dispatched.
pub const EMPTY: MaterialId = 0;

/// Per-tick behavior of a material: `update(x, y, world)`
pub type UpdateFn = Box<dyn Fn(i32, i32, &mut dyn CellWorld) + Send + Sync>;

/// Packed RGBA color of a material, given the cell's age value
pub type ColorFn = Box<dyn Fn(u16) -> u32 + Send + Sync>;

/// How a material behaves physically
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaterialType {
    /// Doesn't move (stone, wood, metal)
    Solid,
    /// Falls, piles up (sand, gravel, ash)
    Powder,
    /// Flows, seeks level (water, oil, lava)
    Liquid,
    /// Rises, disperses (steam, smoke)
    Gas,
}

/// Definition of a material: static properties plus its update and color rules
pub struct MaterialDef {
    pub id: MaterialId,
    pub name: String,
    pub material_type: MaterialType,

    /// Density - affects sinking/floating. `f32::INFINITY` means immovable.
    pub density: f32,

    update: UpdateFn,
    color: ColorFn,
}

impl MaterialDef {
    /// Magenta for materials that never set a color
    pub const MISSING_COLOR: u32 = 0xFFFF_00FF;

    /// Create a material with no behavior and the missing-material color
    pub fn new(
        id: MaterialId,
        name: impl Into<String>,
        material_type: MaterialType,
        density: f32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            material_type,
            density,
            update: Box::new(|_, _, _| {}),
            color: Box::new(|_| Self::MISSING_COLOR),
        }
    }

    /// Replace the update rule
    pub fn with_update<F>(mut self, update: F) -> Self
    where
        F: Fn(i32, i32, &mut dyn CellWorld) + Send + Sync + 'static,
    {
        self.update = Box::new(update);
        self
    }

    /// Replace the color rule
    pub fn with_color<F>(mut self, color: F) -> Self
    where
        F: Fn(u16) -> u32 + Send + Sync + 'static,
    {
        self.color = Box::new(color);
        self
    }

    /// Use a single flat color regardless of age
    pub fn with_rgba(self, r: u8, g: u8, b: u8, a: u8) -> Self {
        let packed = pack_rgba(r, g, b, a);
        self.with_color(move |_| packed)
    }

    /// Run this material's rule for the cell at (x, y)
    #[inline]
    pub fn update(&self, x: i32, y: i32, world: &mut dyn CellWorld) {
        (self.update)(x, y, world);
    }

    /// Packed color (A<<24 | B<<16 | G<<8 | R) for a cell of the given age
    #[inline]
    pub fn color(&self, age: u16) -> u32 {
        (self.color)(age)
    }

    /// Infinite density marks a material that movement rules must never displace
    pub fn is_immovable(&self) -> bool {
        self.density.is_infinite()
    }
}

impl fmt::Debug for MaterialDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MaterialDef")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("material_type", &self.material_type)
            .field("density", &self.density)
            .finish_non_exhaustive()
    }
}

/// Collects material definitions and rejects bad configuration up front
#[derive(Default)]
pub struct MaterialRegistryBuilder {
    materials: Vec<Option<MaterialDef>>,
    names: AHashMap<String, MaterialId>,
}

impl MaterialRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a material. Id 0 and duplicate ids or names are configuration errors.
    pub fn register(mut self, material: MaterialDef) -> Result<Self, RegistryError> {
        if material.id == EMPTY {
            return Err(RegistryError::ReservedEmptyId { name: material.name });
        }

        let id = material.id as usize;

        // Ensure vec is large enough
        if self.materials.len() <= id {
            self.materials.resize_with(id + 1, || None);
        }

        if let Some(existing) = &self.materials[id] {
            return Err(RegistryError::DuplicateId {
                id: material.id,
                existing: existing.name.clone(),
                name: material.name,
            });
        }

        if let Some(&other) = self.names.get(&material.name) {
            return Err(RegistryError::DuplicateName {
                name: material.name,
                existing: other,
                id: material.id,
            });
        }

        self.names.insert(material.name.clone(), material.id);
        self.materials[id] = Some(material);
        Ok(self)
    }

    /// Register several materials, stopping at the first error
    pub fn register_all(
        self,
        materials: impl IntoIterator<Item = MaterialDef>,
    ) -> Result<Self, RegistryError> {
        materials
            .into_iter()
            .try_fold(self, |builder, material| builder.register(material))
    }

    pub fn build(self) -> MaterialRegistry {
        let registry = MaterialRegistry {
            materials: self.materials,
            names: self.names,
        };
        log::debug!("Built material registry with {} materials", registry.len());
        registry
    }
}

/// Immutable catalog of registered materials, indexed by id
pub struct MaterialRegistry {
    materials: Vec<Option<MaterialDef>>,
    names: AHashMap<String, MaterialId>,
}

impl MaterialRegistry {
    pub fn builder() -> MaterialRegistryBuilder {
        MaterialRegistryBuilder::new()
    }

    /// Get material definition by id (None for empty and unregistered ids)
    #[inline]
    pub fn get(&self, id: MaterialId) -> Option<&MaterialDef> {
        self.materials.get(id as usize).and_then(Option::as_ref)
    }

    /// Like [`get`](Self::get), but explains why a definition is missing
    pub fn lookup(&self, id: MaterialId) -> Result<&MaterialDef, RegistryError> {
        if id == EMPTY {
            return Err(RegistryError::EmptyHasNoDefinition);
        }
        self.get(id).ok_or(RegistryError::UnknownMaterial { id })
    }

    #[inline]
    pub fn contains(&self, id: MaterialId) -> bool {
        self.get(id).is_some()
    }

    /// Find a material id by its registered name
    pub fn by_name(&self, name: &str) -> Option<MaterialId> {
        self.names.get(name).copied()
    }

    /// Density of a registered material
    #[inline]
    pub fn density(&self, id: MaterialId) -> Option<f32> {
        self.get(id).map(|m| m.density)
    }

    /// Packed color for a cell; empty cells are fully transparent
    pub fn color(&self, id: MaterialId, age: u16) -> u32 {
        match self.get(id) {
            Some(material) => material.color(age),
            None if id == EMPTY => 0,
            None => MaterialDef::MISSING_COLOR,
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterate registered materials in id order
    pub fn iter(&self) -> impl Iterator<Item = &MaterialDef> {
        self.materials.iter().flatten()
    }
}

impl fmt::Debug for MaterialRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
