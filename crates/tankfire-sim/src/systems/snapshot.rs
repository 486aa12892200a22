//! Snapshot system: queries the ECS world and builds a complete GameStateSnapshot.
//!
//! This system is read-only; it never modifies the world.

use hecs::World;

use tankfire_core::components::*;
use tankfire_core::enums::GamePhase;
use tankfire_core::events::GameEvent;
use tankfire_core::state::*;
use tankfire_core::types::SimTime;
use tankfire_engagement::fov::fov_boundaries;

use crate::engagement::EnemyBrain;

/// Build a complete GameStateSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: GamePhase,
    generation: u32,
    events: Vec<GameEvent>,
) -> GameStateSnapshot {
    let player = build_player(world);
    let hud = HudView::new(player.as_ref().map_or(0, |p| p.health));

    GameStateSnapshot {
        time: *time,
        phase,
        generation,
        player,
        enemies: build_enemies(world),
        projectiles: build_projectiles(world),
        hud,
        events,
    }
}

fn build_player(world: &World) -> Option<PlayerView> {
    world
        .query::<(
            &PlayerTank,
            &Transform,
            &TurretState,
            &Cannon,
            &Health,
            Option<&Destroyed>,
        )>()
        .iter()
        .next()
        .map(|(_, (_, transform, turret, cannon, health, destroyed))| PlayerView {
            position: transform.position,
            hull_yaw_degrees: transform.yaw_degrees,
            turret_yaw_degrees: turret.yaw_degrees,
            elevation_degrees: turret.elevation_degrees,
            health: health.current,
            destroyed: destroyed.is_some(),
            reload_remaining: cannon.reload_remaining,
            charging: cannon.charging,
            launch_speed: cannon.launch_speed,
            arc_preview: cannon.preview.clone(),
        })
}

fn build_enemies(world: &World) -> Vec<EnemyView> {
    let mut enemies: Vec<EnemyView> = world
        .query::<(&EnemyTurret, &Transform, &EnemyBrain, &Health, Option<&Destroyed>)>()
        .iter()
        .map(|(entity, (_, transform, brain, health, destroyed))| {
            let config = brain.controller.config();
            EnemyView {
                id: entity.to_bits().get(),
                position: transform.position,
                yaw_degrees: transform.yaw_degrees,
                mode: brain.controller.mode(),
                target_visible: brain.controller.target_visible(),
                cooldown_remaining: brain.controller.cooldown_remaining(),
                health: health.current,
                destroyed: destroyed.is_some(),
                detection_radius: config.detection_radius,
                fov_edges: fov_boundaries(transform.yaw_degrees, config.field_of_view_degrees),
            }
        })
        .collect();

    enemies.sort_by_key(|e| e.id);
    enemies
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    world
        .query::<(&Projectile, &Transform, &Velocity)>()
        .iter()
        .map(|(_, (projectile, transform, velocity))| ProjectileView {
            kind: projectile.kind,
            faction: projectile.faction,
            position: transform.position,
            velocity: velocity.0,
        })
        .collect()
}
