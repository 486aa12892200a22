//! Cleanup system: removes expired wrecks and projectiles that left the arena.

use hecs::{Entity, World};

use tankfire_core::components::{Destroyed, Projectile, Transform};
use tankfire_core::constants::{ARENA_HALF_EXTENT, GROUND_HEIGHT};
use tankfire_core::types::horizontal;

/// Count down wreck timers and despawn anything that is finished.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(world: &mut World, dt: f64, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, destroyed) in world.query_mut::<&mut Destroyed>() {
        destroyed.despawn_in_secs -= dt;
        if destroyed.despawn_in_secs <= 0.0 {
            despawn_buffer.push(entity);
        }
    }

    // Projectiles outside the arena or below the ground.
    for (entity, (transform, _projectile)) in world.query_mut::<(&Transform, &Projectile)>() {
        let pos = transform.position;
        if horizontal(pos).length() > ARENA_HALF_EXTENT || pos.y < GROUND_HEIGHT - 1.0 {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
