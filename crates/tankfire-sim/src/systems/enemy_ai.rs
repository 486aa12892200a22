//! Enemy turret AI: sweep, scan, and fire.
//!
//! Each tick every turret advances its controller timers. A turret with no
//! visible target keeps sweeping its yaw; one with a target turns to face it.
//! Scans run when the turret's scan clock is due, with the living player
//! tanks as candidates and the arena as the occluder. `Fire` results are
//! handed to [`launch`] with a world-backed spawner.

use hecs::{Entity, World};
use tracing::{debug, info};

use tankfire_core::components::*;
use tankfire_core::constants::{BARREL_LENGTH, MUZZLE_HEIGHT};
use tankfire_core::enums::{Faction, ProjectileKind};
use tankfire_core::events::{EngagementEvent, GameEvent};
use tankfire_core::types::{Vector3, UP};
use tankfire_engagement::fov::{direction_from_yaw, yaw_from_direction};
use tankfire_engagement::{launch, Candidate, ScanContext};

use crate::arena::ArenaGeometry;
use crate::engagement::EnemyBrain;
use crate::systems::projectiles::WorldSpawner;

/// A scan result waiting to be turned into a projectile.
struct PendingShot {
    turret: Entity,
    event: EngagementEvent,
    muzzle: Vector3,
    lifetime: f64,
}

/// Player tanks that can currently be targeted, aimed at their hit-sphere centers.
pub fn candidates(world: &World) -> Vec<Candidate> {
    world
        .query::<(&PlayerTank, &Transform, &HitSphere, Option<&Destroyed>)>()
        .iter()
        .filter(|(_, (_, _, _, destroyed))| destroyed.is_none())
        .map(|(entity, (_, transform, sphere, _))| Candidate {
            id: entity.to_bits().get(),
            position: transform.position + UP * sphere.height,
        })
        .collect()
}

/// Run the turret AI for one tick.
pub fn run(
    world: &mut World,
    arena: &ArenaGeometry,
    gravity: f64,
    dt: f64,
    events: &mut Vec<GameEvent>,
) {
    let candidates = candidates(world);
    let mut pending: Vec<PendingShot> = Vec::new();

    for (entity, (turret, transform, brain, destroyed)) in world.query_mut::<(
        &EnemyTurret,
        &mut Transform,
        &mut EnemyBrain,
        Option<&Destroyed>,
    )>() {
        if destroyed.is_some() {
            continue;
        }

        brain.controller.tick(dt);
        if !brain.controller.target_visible() {
            transform.yaw_degrees =
                (transform.yaw_degrees + turret.sweep_rate_degrees * dt).rem_euclid(360.0);
        }

        if !brain.clock.advance(dt) {
            continue;
        }

        let sensor = transform.position + UP * MUZZLE_HEIGHT;
        let was_visible = brain.controller.target_visible();
        let ctx = ScanContext {
            candidates: &candidates,
            self_position: sensor,
            self_forward: direction_from_yaw(transform.yaw_degrees),
            gravity,
        };
        let event = brain.controller.scan_tick(&ctx, arena);
        let turret_id = entity.to_bits().get();

        let Some(target) = event.target() else {
            if was_visible {
                info!(turret = turret_id, "target lost");
                events.push(GameEvent::TargetLost { turret: turret_id });
            }
            continue;
        };

        if !was_visible {
            info!(turret = turret_id, target, "target acquired");
            events.push(GameEvent::TargetAcquired {
                turret: turret_id,
                target,
            });
        }

        // Track the target so it stays centered in the vision cone.
        if let Some(candidate) = candidates.iter().find(|c| c.id == target) {
            if let Some(to_target) = (candidate.position - sensor).try_normalize() {
                transform.yaw_degrees = yaw_from_direction(to_target);
            }
        }

        match event {
            EngagementEvent::Fire { velocity, .. } => {
                let heading = velocity.try_normalize().unwrap_or(Vector3::ZERO);
                pending.push(PendingShot {
                    turret: entity,
                    event,
                    muzzle: sensor + heading * BARREL_LENGTH,
                    lifetime: turret.round_lifetime_secs,
                });
            }
            EngagementEvent::FireSolutionFailed { error, .. } => {
                events.push(GameEvent::FireSolutionFailed {
                    turret: turret_id,
                    error,
                });
            }
            EngagementEvent::TargetAcquired { .. } | EngagementEvent::NoTarget => {}
        }
    }

    for shot in pending {
        let mut spawner = WorldSpawner::new(
            world,
            Projectile {
                kind: ProjectileKind::Round,
                faction: Faction::Enemy,
                owner: shot.turret.to_bits().get(),
                lifetime_remaining: Some(shot.lifetime),
            },
        );
        if launch(&shot.event, shot.muzzle, &mut spawner) {
            debug!(turret = shot.turret.to_bits().get(), position = ?shot.muzzle, "enemy round fired");
            events.push(GameEvent::ShotFired {
                faction: Faction::Enemy,
                kind: ProjectileKind::Round,
                position: shot.muzzle,
            });
        }
    }
}
