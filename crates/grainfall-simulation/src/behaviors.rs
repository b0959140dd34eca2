//! Reusable movement and heat rules built only on [`CellWorld`]
//!
//! Coordinates grow downward: `y + 1` is the cell below.

use crate::materials::{EMPTY, MaterialType};
use crate::world_access::CellWorld;

/// Temperature differences below this are not exchanged, so settled regions can sleep
const HEAT_EPSILON: f32 = 0.01;

/// Try to move a cell from one position to another.
/// Returns true if the move succeeded.
///
/// A cell moves into empty space, or displaces a lighter non-solid material.
/// Immovable materials (infinite density) never move and are never displaced.
pub fn try_move(
    world: &mut dyn CellWorld,
    from_x: i32,
    from_y: i32,
    to_x: i32,
    to_y: i32,
) -> bool {
    if !world.in_bounds(from_x, from_y) || !world.in_bounds(to_x, to_y) {
        return false;
    }

    let src = world.get(from_x, from_y);
    if src == EMPTY {
        return false;
    }

    let Some(src_density) = world.density(src) else {
        return false;
    };
    if src_density.is_infinite() {
        return false;
    }

    let dst = world.get(to_x, to_y);
    if dst == EMPTY {
        return world.swap(from_x, from_y, to_x, to_y);
    }

    // Can't move into solid
    if world.material_type(dst) == Some(MaterialType::Solid) {
        return false;
    }

    // Can only displace lighter material
    match world.density(dst) {
        Some(dst_density) if dst_density.is_finite() && dst_density < src_density => {
            world.swap(from_x, from_y, to_x, to_y)
        }
        _ => false,
    }
}

/// Powder: falls down, then disperses diagonally (random direction first)
pub fn fall_powder(world: &mut dyn CellWorld, x: i32, y: i32) -> bool {
    if try_move(world, x, y, x, y + 1) {
        return true;
    }

    let dx = world.rng().gen_direction();
    try_move(world, x, y, x + dx, y + 1) || try_move(world, x, y, x - dx, y + 1)
}

/// Liquid: falls, then flows horizontally, then slides down diagonals
pub fn flow_liquid(world: &mut dyn CellWorld, x: i32, y: i32) -> bool {
    if try_move(world, x, y, x, y + 1) {
        return true;
    }

    let dx = world.rng().gen_direction();
    try_move(world, x, y, x + dx, y)
        || try_move(world, x, y, x - dx, y)
        || try_move(world, x, y, x + dx, y + 1)
        || try_move(world, x, y, x - dx, y + 1)
}

/// Gas: rises, then drifts up diagonally, then disperses horizontally
pub fn rise_gas(world: &mut dyn CellWorld, x: i32, y: i32) -> bool {
    if try_move_into_empty(world, x, y, x, y - 1) {
        return true;
    }

    let dx = world.rng().gen_direction();
    try_move_into_empty(world, x, y, x + dx, y - 1)
        || try_move_into_empty(world, x, y, x - dx, y - 1)
        || try_move_into_empty(world, x, y, x + dx, y)
        || try_move_into_empty(world, x, y, x - dx, y)
}

/// Gases only travel through empty space; denser neighbors sink through them instead
fn try_move_into_empty(
    world: &mut dyn CellWorld,
    from_x: i32,
    from_y: i32,
    to_x: i32,
    to_y: i32,
) -> bool {
    world.is_empty(to_x, to_y) && try_move(world, from_x, from_y, to_x, to_y)
}

/// Exchange heat with the 4 orthogonal neighbors. `rate` is the fraction of
/// each temperature difference moved per tick. Total heat is conserved.
///
/// Order: S, E, N, W
pub fn diffuse_heat(world: &mut dyn CellWorld, x: i32, y: i32, rate: f32) {
    for (dx, dy) in [(0, 1), (1, 0), (0, -1), (-1, 0)] {
        let nx = x + dx;
        let ny = y + dy;
        if !world.in_bounds(nx, ny) {
            continue;
        }

        let flow = (world.temp(nx, ny) - world.temp(x, y)) * rate;
        if flow.abs() < HEAT_EPSILON {
            continue;
        }
        world.add_temp(x, y, flow);
        world.add_temp(nx, ny, -flow);
    }
}
