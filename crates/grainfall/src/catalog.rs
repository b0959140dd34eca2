//! Demo material catalog
//!
//! A handful of materials exercising every facade feature: gravity by density,
//! heat exchange, age used as a lifetime, and chance-driven reactions.

use grainfall_core::prelude::*;
use grainfall_simulation::behaviors::{diffuse_heat, fall_powder, flow_liquid, rise_gas};
use grainfall_simulation::{pack_rgba, shade};

pub const STONE: MaterialId = 1;
pub const SAND: MaterialId = 2;
pub const WATER: MaterialId = 3;
pub const WOOD: MaterialId = 4;
pub const FIRE: MaterialId = 5;
pub const SMOKE: MaterialId = 6;
pub const STEAM: MaterialId = 7;

/// Ticks a flame burns before dying out
const FIRE_LIFETIME: u16 = 40;
/// Ticks smoke lingers before fading
const SMOKE_LIFETIME: u16 = 120;
/// Ticks steam rises before it may condense
const STEAM_LIFETIME: u16 = 200;

const FIRE_TEMPERATURE: f32 = 600.0;
const WOOD_IGNITION_TEMPERATURE: f32 = 250.0;
const BOILING_POINT: f32 = 100.0;

const NEIGHBORS: [(i32, i32); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// Build the demo registry
pub fn demo_registry() -> Result<MaterialRegistry, EngineError> {
    let registry = MaterialRegistry::builder()
        .register_all([
            MaterialDef::new(STONE, "stone", MaterialType::Solid, f32::INFINITY)
                .with_rgba(128, 128, 128, 255)
                .with_update(|x, y, world: &mut dyn CellWorld| diffuse_heat(world, x, y, 0.05)),
            MaterialDef::new(SAND, "sand", MaterialType::Powder, 1.6)
                .with_rgba(194, 178, 128, 255)
                .with_update(update_sand),
            MaterialDef::new(WATER, "water", MaterialType::Liquid, 1.0)
                .with_rgba(40, 90, 220, 200)
                .with_update(update_water),
            MaterialDef::new(WOOD, "wood", MaterialType::Solid, f32::INFINITY)
                .with_rgba(110, 70, 30, 255)
                .with_update(update_wood),
            MaterialDef::new(FIRE, "fire", MaterialType::Gas, 0.1)
                .with_color(fire_color)
                .with_update(update_fire),
            MaterialDef::new(SMOKE, "smoke", MaterialType::Gas, 0.05)
                .with_rgba(70, 70, 70, 160)
                .with_update(update_smoke),
            MaterialDef::new(STEAM, "steam", MaterialType::Gas, 0.02)
                .with_rgba(210, 220, 230, 140)
                .with_update(update_steam),
        ])?
        .build();
    Ok(registry)
}

fn update_sand(x: i32, y: i32, world: &mut dyn CellWorld) {
    if !fall_powder(world, x, y) {
        diffuse_heat(world, x, y, 0.1);
    }
}

fn update_water(x: i32, y: i32, world: &mut dyn CellWorld) {
    if world.temp(x, y) > BOILING_POINT {
        world.set(x, y, STEAM);
        return;
    }
    if !flow_liquid(world, x, y) {
        diffuse_heat(world, x, y, 0.2);
    }
}

fn update_wood(x: i32, y: i32, world: &mut dyn CellWorld) {
    if world.temp(x, y) > WOOD_IGNITION_TEMPERATURE {
        if world.chance(0.05) {
            ignite(world, x, y);
            return;
        }
        // Keep rolling until it catches
        world.wake_area(x, y);
    }
    diffuse_heat(world, x, y, 0.05);
}

/// Fire heats and spreads to its neighbors, rises a little, and burns out
fn update_fire(x: i32, y: i32, world: &mut dyn CellWorld) {
    let age = world.age(x, y).saturating_add(1);
    if age > FIRE_LIFETIME {
        let remains = if world.chance(0.5) { SMOKE } else { EMPTY };
        world.set(x, y, remains);
        return;
    }
    world.set_age(x, y, age);

    for (dx, dy) in NEIGHBORS {
        let (nx, ny) = (x + dx, y + dy);
        match world.get(nx, ny) {
            WOOD if world.chance(0.1) => ignite(world, nx, ny),
            WATER => {
                // Quenched
                world.set(x, y, STEAM);
                return;
            }
            _ => {
                world.add_temp(nx, ny, 5.0);
            }
        }
    }

    if world.chance(0.3) {
        rise_gas(world, x, y);
    }
}

fn update_smoke(x: i32, y: i32, world: &mut dyn CellWorld) {
    let age = world.age(x, y).saturating_add(1);
    if age > SMOKE_LIFETIME && world.chance(0.05) {
        world.set(x, y, EMPTY);
        return;
    }
    world.set_age(x, y, age);
    rise_gas(world, x, y);
}

fn update_steam(x: i32, y: i32, world: &mut dyn CellWorld) {
    let age = world.age(x, y).saturating_add(1);
    if age > STEAM_LIFETIME && world.temp(x, y) < BOILING_POINT && world.chance(0.02) {
        world.set(x, y, WATER);
        return;
    }
    world.set_age(x, y, age);
    if !rise_gas(world, x, y) {
        diffuse_heat(world, x, y, 0.2);
    }
}

fn ignite(world: &mut dyn CellWorld, x: i32, y: i32) {
    if world.set(x, y, FIRE) {
        world.set_temp(x, y, FIRE_TEMPERATURE);
    }
}

/// Bright yellow when fresh, dimming to deep red as it burns out
fn fire_color(age: u16) -> u32 {
    let t = f32::from(age.min(FIRE_LIFETIME)) / f32::from(FIRE_LIFETIME);
    let green = (220.0 * (1.0 - t)) as u8;
    shade(pack_rgba(255, green, 30, 230), 1.0 - 0.4 * t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use grainfall_simulation::unpack_rgba;

    fn world(width: usize, height: usize) -> World {
        World::new(EngineConfig::with_size(width, height), demo_registry().unwrap()).unwrap()
    }

    #[test]
    fn test_registry_contents() {
        let registry = demo_registry().unwrap();
        assert_eq!(registry.len(), 7);
        assert_eq!(registry.by_name("sand"), Some(SAND));
        assert_eq!(registry.by_name("steam"), Some(STEAM));
        assert!(registry.get(STONE).unwrap().is_immovable());
        assert!(registry.get(WOOD).unwrap().is_immovable());
        assert!(!registry.get(WATER).unwrap().is_immovable());
    }

    #[test]
    fn test_fire_color_fades() {
        let fresh = unpack_rgba(fire_color(0));
        let old = unpack_rgba(fire_color(FIRE_LIFETIME));
        assert!(fresh[1] > old[1]);
        assert!(fresh[0] > old[0]);
        assert_eq!(fresh[3], 230);
    }

    #[test]
    fn test_sand_sinks_through_water() {
        let mut world = world(3, 4);
        world.set(1, 0, SAND).unwrap();
        world.set(1, 1, WATER).unwrap();
        world.set(0, 3, STONE).unwrap();
        world.set(1, 3, STONE).unwrap();
        world.set(2, 3, STONE).unwrap();

        world.step_n(10);

        assert_eq!(world.get(1, 2).unwrap(), SAND);
        assert_eq!(world.get(1, 3).unwrap(), STONE);
    }

    #[test]
    fn test_fire_burns_out() {
        let mut world = world(5, 5);
        world.set(2, 4, FIRE).unwrap();

        world.step_n(u64::from(FIRE_LIFETIME) + 60);

        assert!(
            !world.store().materials().contains(&FIRE),
            "fire should have burned out"
        );
    }

    #[test]
    fn test_hot_water_boils() {
        let mut world = world(3, 3);
        world.set(1, 2, WATER).unwrap();
        world.set_temp(1, 2, 150.0).unwrap();

        world.step();

        assert_eq!(world.get(1, 2).unwrap(), STEAM);
    }

    #[test]
    fn test_hot_wood_stays_awake_until_it_ignites() {
        // Lone cell: no neighbor to shed heat to
        let mut world = world(1, 1);
        world.set(0, 0, WOOD).unwrap();
        world.set_temp(0, 0, WOOD_IGNITION_TEMPERATURE + 50.0).unwrap();

        let mut ignited = false;
        for _ in 0..400 {
            world.step();
            if world.get(0, 0).unwrap() != WOOD {
                ignited = true;
                break;
            }
            assert!(world.pending_cells() > 0, "hot wood fell asleep");
        }
        assert!(ignited);
    }

    #[test]
    fn test_fire_ignites_wood_eventually() {
        let mut world = world(6, 2);
        for x in 0..6 {
            world.set(x, 0, FIRE).unwrap();
            world.set(x, 1, WOOD).unwrap();
        }

        let mut burned = false;
        for _ in 0..FIRE_LIFETIME {
            world.step();
            if world.store().materials()[6..12].iter().any(|&id| id != WOOD) {
                burned = true;
                break;
            }
        }
        assert!(burned);
    }
}
