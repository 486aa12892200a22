//! Entity spawn factories for setting up the simulation world.
//!
//! Creates the player tank and enemy turrets with their component bundles,
//! and builds the arena geometry. Fixed placements come from the scenario;
//! scattered ones are drawn from a seeded ChaCha8 stream so a reset with the
//! same seed reproduces the same layout.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use tankfire_core::components::*;
use tankfire_core::config::{EnemyConfig, PlayerTankConfig, ScenarioConfig, ScatterConfig};
use tankfire_core::constants::*;
use tankfire_core::enums::Faction;
use tankfire_core::error::ConfigError;
use tankfire_core::types::{Aabb, Vector3};
use tankfire_engagement::fov::{direction_from_yaw, yaw_from_direction};

use crate::arena::ArenaGeometry;
use crate::engagement::EnemyBrain;

/// Populate `world` from `scenario` and return the static geometry.
pub fn setup_scene(
    world: &mut World,
    scenario: &ScenarioConfig,
    rng: &mut ChaCha8Rng,
) -> Result<ArenaGeometry, ConfigError> {
    spawn_player(world, &scenario.player);

    let mut obstacles: Vec<Aabb> = scenario
        .obstacles
        .iter()
        .map(|o| Aabb::from_center(o.center, o.half_extents))
        .collect();

    for placement in &scenario.enemies {
        spawn_enemy(world, &scenario.enemy, placement.position, placement.yaw_degrees)?;
    }

    if let Some(scatter) = &scenario.scatter {
        scatter_enemies(world, rng, scatter, scenario)?;
        obstacles.extend(scatter_obstacles(rng, scatter, scenario.player.spawn));
    }

    debug!(
        enemies = world.query::<&EnemyTurret>().iter().count(),
        obstacles = obstacles.len(),
        "scene populated"
    );
    Ok(ArenaGeometry::new(GROUND_HEIGHT, obstacles))
}

/// Spawn the player's tank with full health and a loaded cannon.
pub fn spawn_player(world: &mut World, config: &PlayerTankConfig) -> hecs::Entity {
    let cannon = Cannon {
        max_range: config.max_range,
        launch_multiplier: config.launch_multiplier,
        min_launch_speed: config.min_launch_speed,
        max_launch_speed: config.max_launch_speed,
        reload_secs: config.reload_secs(),
        ..Default::default()
    };

    world.spawn((
        PlayerTank,
        Transform {
            position: config.spawn,
            yaw_degrees: config.yaw_degrees,
        },
        DriveInput::default(),
        Mobility {
            speed: config.speed,
            turn_speed_degrees: config.turn_speed_degrees,
        },
        TurretState::default(),
        cannon,
        Health::new(config.health),
        tank_hit_sphere(),
        Allegiance(Faction::Player),
    ))
}

/// Spawn an enemy turret at `position`, initially facing `yaw_degrees`.
pub fn spawn_enemy(
    world: &mut World,
    config: &EnemyConfig,
    position: Vector3,
    yaw_degrees: f64,
) -> Result<hecs::Entity, ConfigError> {
    let brain = EnemyBrain::new(config.engagement)?;
    Ok(world.spawn((
        EnemyTurret {
            sweep_rate_degrees: config.sweep_rate_degrees,
            round_lifetime_secs: config.round_lifetime_secs,
        },
        Transform {
            position,
            yaw_degrees: yaw_degrees.rem_euclid(360.0),
        },
        brain,
        Health::new(config.health),
        tank_hit_sphere(),
        Allegiance(Faction::Enemy),
    )))
}

fn tank_hit_sphere() -> HitSphere {
    HitSphere {
        radius: TANK_HIT_RADIUS,
        height: MUZZLE_HEIGHT,
    }
}

/// Point on the scatter ring around `center`.
fn ring_point(rng: &mut ChaCha8Rng, scatter: &ScatterConfig, center: Vector3) -> Vector3 {
    let bearing: f64 = rng.gen_range(0.0..360.0);
    let radius: f64 = rng.gen_range(scatter.min_radius..scatter.max_radius);
    let offset = direction_from_yaw(bearing) * radius;
    Vector3::new(center.x + offset.x, GROUND_HEIGHT, center.z + offset.z)
}

/// Scatter turrets around the player spawn, each facing the spawn.
fn scatter_enemies(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    scatter: &ScatterConfig,
    scenario: &ScenarioConfig,
) -> Result<(), ConfigError> {
    let spawn = scenario.player.spawn;
    for _ in 0..scatter.enemy_count {
        let position = ring_point(rng, scatter, spawn);
        let yaw = yaw_from_direction(spawn - position);
        spawn_enemy(world, &scenario.enemy, position, yaw)?;
    }
    Ok(())
}

/// Scatter box obstacles resting on the ground.
fn scatter_obstacles(rng: &mut ChaCha8Rng, scatter: &ScatterConfig, center: Vector3) -> Vec<Aabb> {
    (0..scatter.obstacle_count)
        .map(|_| {
            let base = ring_point(rng, scatter, center);
            let half = Vector3::new(
                rng.gen_range(0.5..3.0),
                rng.gen_range(0.5..2.0),
                rng.gen_range(0.5..3.0),
            );
            Aabb::from_center(base + Vector3::new(0.0, half.y, 0.0), half)
        })
        .collect()
}
