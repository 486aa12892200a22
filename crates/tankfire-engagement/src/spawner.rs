//! Projectile spawn capability supplied by the driver.

use glam::DQuat;

use tankfire_core::events::EngagementEvent;
use tankfire_core::types::Vector3;

/// Creates a projectile in the host world.
pub trait ProjectileSpawner {
    type Handle;

    fn spawn_projectile(&mut self, position: Vector3, rotation: DQuat, velocity: Vector3) -> Self::Handle;
}

/// Act on a scan result: spawn exactly one projectile for `Fire`, nothing otherwise.
///
/// The projectile is oriented along its velocity. The spawner's handle is
/// dropped before returning. Returns whether a projectile was spawned.
pub fn launch<S: ProjectileSpawner + ?Sized>(
    event: &EngagementEvent,
    muzzle: Vector3,
    spawner: &mut S,
) -> bool {
    let EngagementEvent::Fire { velocity, .. } = event else {
        return false;
    };
    let _ = spawner.spawn_projectile(muzzle, heading_rotation(*velocity), *velocity);
    true
}

/// Rotation taking +z onto the direction of `velocity`. Identity for a zero velocity.
pub fn heading_rotation(velocity: Vector3) -> DQuat {
    velocity
        .try_normalize()
        .map(|heading| DQuat::from_rotation_arc(Vector3::Z, heading))
        .unwrap_or(DQuat::IDENTITY)
}
