//! Material definitions and the rule contract for Grainfall
//!
//! This crate provides everything a material rule needs, and nothing of the
//! engine internals:
//! - Material definitions and the registry (MaterialId, MaterialDef, MaterialRegistry)
//! - The world facade trait rules mutate the grid through (CellWorld)
//! - The injectable random source (RuleRng)
//! - Packed color helpers and reusable movement behaviors

pub mod behaviors;
mod color;
mod error;
mod materials;
mod rng;
mod world_access;

pub use color::{pack_rgba, shade, unpack_rgba};
pub use error::RegistryError;
pub use materials::{
    ColorFn, EMPTY, MaterialDef, MaterialId, MaterialRegistry, MaterialRegistryBuilder,
    MaterialType, UpdateFn,
};
pub use rng::RuleRng;
pub use world_access::CellWorld;
