//! Player tank systems: hull movement, turret traverse, cannon charge and fire.

use hecs::{Entity, World};
use tracing::debug;

use tankfire_ballistics::predict_path;
use tankfire_ballistics::solve_launch_force;
use tankfire_core::components::*;
use tankfire_core::constants::*;
use tankfire_core::enums::{Faction, ProjectileKind};
use tankfire_core::error::BallisticsError;
use tankfire_core::events::GameEvent;
use tankfire_core::types::{direction_from_yaw_pitch, Vector3, UP};
use tankfire_engagement::{heading_rotation, ProjectileSpawner};

use crate::arena::ArenaGeometry;
use crate::systems::projectiles::WorldSpawner;

/// Clamp an axis input to [-1, 1]. Non-finite input reads as released.
pub fn axis(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

/// Apply `update` to the player's held inputs.
pub fn set_input(world: &mut World, update: impl Fn(&mut DriveInput)) {
    for (_entity, (_player, input)) in world.query_mut::<(&PlayerTank, &mut DriveInput)>() {
        update(input);
    }
}

/// Run hull, turret, and cannon updates for one tick.
pub fn run(world: &mut World, arena: &ArenaGeometry, gravity: f64, dt: f64) {
    drive(world, arena, dt);
    aim(world, dt);
    charge(world, arena, gravity, dt);
}

/// Move and turn the hull. The hull only turns while it is moving.
fn drive(world: &mut World, arena: &ArenaGeometry, dt: f64) {
    for (_entity, (_player, transform, input, mobility, sphere, destroyed)) in world.query_mut::<(
        &PlayerTank,
        &mut Transform,
        &DriveInput,
        &Mobility,
        &HitSphere,
        Option<&Destroyed>,
    )>() {
        if destroyed.is_some() || input.throttle == 0.0 {
            continue;
        }

        transform.yaw_degrees = (transform.yaw_degrees
            + input.steering * mobility.turn_speed_degrees * dt)
            .rem_euclid(360.0);

        let forward = direction_from_yaw_pitch(transform.yaw_degrees, 0.0);
        let next = transform.position + forward * (mobility.speed * input.throttle * dt);
        if !arena.blocks(next + UP * sphere.height) {
            transform.position = next;
        }
    }
}

/// Traverse the turret and raise or lower the cannon.
fn aim(world: &mut World, dt: f64) {
    for (_entity, (_player, input, turret, destroyed)) in world.query_mut::<(
        &PlayerTank,
        &DriveInput,
        &mut TurretState,
        Option<&Destroyed>,
    )>() {
        if destroyed.is_some() {
            continue;
        }
        turret.yaw_degrees =
            (turret.yaw_degrees + input.turret * TURRET_YAW_RATE * dt).rem_euclid(360.0);
        turret.elevation_degrees = (turret.elevation_degrees
            + input.elevation * CANNON_ELEVATION_RATE * dt)
            .clamp(CANNON_MIN_ELEVATION, CANNON_MAX_ELEVATION);
    }
}

/// Count down the reload and refresh the arc preview while charging.
fn charge(world: &mut World, arena: &ArenaGeometry, gravity: f64, dt: f64) {
    for (_entity, (_player, transform, turret, cannon, destroyed)) in world.query_mut::<(
        &PlayerTank,
        &Transform,
        &TurretState,
        &mut Cannon,
        Option<&Destroyed>,
    )>() {
        cannon.reload_remaining = (cannon.reload_remaining - dt).max(0.0);

        if !cannon.charging || destroyed.is_some() {
            cannon.preview.clear();
            continue;
        }

        cannon.launch_speed = launch_speed(cannon, turret.elevation_degrees, gravity);
        let (muzzle, direction) = muzzle_pose(transform, turret);
        cannon.preview = predict_path(
            muzzle,
            direction * cannon.launch_speed,
            gravity,
            PREVIEW_SAMPLE_COUNT,
            PREVIEW_TIME_STEP,
            arena,
        )
        .map(|p| p.position)
        .collect();
    }
}

/// Launch speed for the cannon at `elevation_degrees`.
///
/// Solves for the cannon's maximum range, substituting
/// [`MIN_LOFT_ANGLE_DEGREES`] when the elevation is degenerate, then scales
/// and clamps to the cannon's limits.
pub fn launch_speed(cannon: &Cannon, elevation_degrees: f64, gravity: f64) -> f64 {
    let solved = match solve_launch_force(cannon.max_range, elevation_degrees, gravity) {
        Ok(speed) => speed,
        Err(BallisticsError::DegenerateAngle { .. }) => {
            solve_launch_force(cannon.max_range, MIN_LOFT_ANGLE_DEGREES, gravity)
                .unwrap_or(cannon.max_launch_speed)
        }
        Err(BallisticsError::NoSolution) => cannon.min_launch_speed,
    };
    (solved * cannon.launch_multiplier).clamp(cannon.min_launch_speed, cannon.max_launch_speed)
}

/// Muzzle position and barrel direction.
pub fn muzzle_pose(transform: &Transform, turret: &TurretState) -> (Vector3, Vector3) {
    let direction = direction_from_yaw_pitch(
        transform.yaw_degrees + turret.yaw_degrees,
        turret.elevation_degrees,
    );
    let muzzle = transform.position + UP * MUZZLE_HEIGHT + direction * BARREL_LENGTH;
    (muzzle, direction)
}

/// Start charging a shot.
pub fn begin_charge(world: &mut World) {
    for (_entity, (_player, cannon, destroyed)) in
        world.query_mut::<(&PlayerTank, &mut Cannon, Option<&Destroyed>)>()
    {
        if destroyed.is_none() {
            cannon.charging = true;
        }
    }
}

/// End the charge and fire a shell if the cannon is loaded.
pub fn release_fire(world: &mut World, gravity: f64, events: &mut Vec<GameEvent>) -> Option<Entity> {
    let mut shot = None;
    for (entity, (_player, transform, turret, cannon, destroyed)) in world.query_mut::<(
        &PlayerTank,
        &Transform,
        &TurretState,
        &mut Cannon,
        Option<&Destroyed>,
    )>() {
        if destroyed.is_some() || !cannon.charging {
            continue;
        }
        cannon.charging = false;
        cannon.preview.clear();
        if cannon.reload_remaining > 0.0 {
            debug!(reload_remaining = cannon.reload_remaining, "cannon not loaded");
            continue;
        }

        let speed = launch_speed(cannon, turret.elevation_degrees, gravity);
        cannon.launch_speed = speed;
        cannon.reload_remaining = cannon.reload_secs;
        let (muzzle, direction) = muzzle_pose(transform, turret);
        shot = Some((entity, muzzle, direction * speed));
    }

    let (owner, muzzle, velocity) = shot?;
    let mut spawner = WorldSpawner::new(
        world,
        Projectile {
            kind: ProjectileKind::Shell,
            faction: Faction::Player,
            owner: owner.to_bits().get(),
            lifetime_remaining: None,
        },
    );
    let shell = spawner.spawn_projectile(muzzle, heading_rotation(velocity), velocity);
    debug!(speed = velocity.length(), position = ?muzzle, "player shell fired");
    events.push(GameEvent::ShotFired {
        faction: Faction::Player,
        kind: ProjectileKind::Shell,
        position: muzzle,
    });
    Some(shell)
}
