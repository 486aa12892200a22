//! Tests for the simulation engine, the turret loop, and the scene lifecycle.

use approx::assert_relative_eq;

use tankfire_core::commands::PlayerCommand;
use tankfire_core::components::{EnemyTurret, Health, PlayerTank, Projectile, TurretState};
use tankfire_core::config::{ObstacleConfig, ScatterConfig, ScenarioConfig};
use tankfire_core::constants::*;
use tankfire_core::enums::*;
use tankfire_core::events::GameEvent;
use tankfire_core::state::GameStateSnapshot;
use tankfire_core::types::Vector3;

use crate::engine::{SimConfig, SimulationEngine};

fn engine_with(scenario: ScenarioConfig) -> SimulationEngine {
    SimulationEngine::new(SimConfig::from_scenario(scenario)).unwrap()
}

fn run(engine: &mut SimulationEngine, ticks: usize) -> Vec<GameStateSnapshot> {
    (0..ticks).map(|_| engine.tick()).collect()
}

fn all_events(snapshots: &[GameStateSnapshot]) -> impl Iterator<Item = &GameEvent> {
    snapshots.iter().flat_map(|s| s.events.iter())
}

/// Default layout with the side wall moved between the player and the turret.
fn walled_scenario() -> ScenarioConfig {
    ScenarioConfig {
        obstacles: vec![ObstacleConfig {
            center: Vector3::new(0.0, 1.5, 10.0),
            half_extents: Vector3::new(2.0, 1.5, 2.0),
        }],
        ..Default::default()
    }
}

fn player_health(engine: &SimulationEngine) -> u32 {
    let mut query = engine.world().query::<(&PlayerTank, &Health)>();
    query.iter().next().map_or(0, |(_, (_, h))| h.current)
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let scenario = ScenarioConfig {
        scatter: Some(ScatterConfig {
            enemy_count: 3,
            obstacle_count: 4,
            ..Default::default()
        }),
        ..Default::default()
    };
    let mut engine_a = engine_with(scenario.clone());
    let mut engine_b = engine_with(scenario);

    for _ in 0..300 {
        let json_a = serde_json::to_string(&engine_a.tick()).unwrap();
        let json_b = serde_json::to_string(&engine_b.tick()).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
    }
}

#[test]
fn test_scatter_depends_on_seed() {
    let scenario = ScenarioConfig {
        scatter: Some(ScatterConfig {
            enemy_count: 2,
            obstacle_count: 2,
            ..Default::default()
        }),
        ..Default::default()
    };
    let mut engine_a = SimulationEngine::new(SimConfig {
        seed: 111,
        scenario: scenario.clone(),
    })
    .unwrap();
    let mut engine_b = SimulationEngine::new(SimConfig {
        seed: 222,
        scenario,
    })
    .unwrap();

    let snap_a = engine_a.tick();
    let snap_b = engine_b.tick();
    assert_eq!(snap_a.enemies.len(), 3);
    assert_ne!(snap_a.enemies[1].position, snap_b.enemies[1].position);
    assert_ne!(engine_a.arena(), engine_b.arena());
}

#[test]
fn test_scattered_turrets_face_the_spawn() {
    let scenario = ScenarioConfig {
        enemies: Vec::new(),
        scatter: Some(ScatterConfig {
            enemy_count: 4,
            obstacle_count: 0,
            min_radius: 20.0,
            max_radius: 25.0,
        }),
        ..Default::default()
    };
    let mut engine = engine_with(scenario);
    let snapshot = engine.tick();
    assert_eq!(snapshot.enemies.len(), 4);
    for enemy in &snapshot.enemies {
        let distance = enemy.position.length();
        assert!((20.0..=25.0).contains(&distance), "distance {distance}");
        assert_eq!(enemy.position.y, GROUND_HEIGHT);
    }
}

// ---- Scene lifecycle ----

#[test]
fn test_first_tick_loads_scene() {
    let mut engine = SimulationEngine::new(SimConfig::default()).unwrap();
    assert_eq!(engine.phase(), GamePhase::Loading);

    let snapshot = engine.tick();
    assert_eq!(snapshot.phase, GamePhase::Active);
    assert_eq!(snapshot.generation, 1);
    assert!(snapshot
        .events
        .contains(&GameEvent::SceneLoaded { generation: 1 }));

    let player = snapshot.player.unwrap();
    assert_eq!(player.health, PLAYER_HEALTH);
    assert_eq!(snapshot.hud.text, format!("Player Health\n{PLAYER_HEALTH}"));
    assert_eq!(snapshot.enemies.len(), 1);
    assert_eq!(snapshot.enemies[0].detection_radius, DEFAULT_DETECTION_RADIUS);
}

#[test]
fn test_invalid_scenario_rejected() {
    let scenario = ScenarioConfig {
        gravity: 0.0,
        ..Default::default()
    };
    assert!(SimulationEngine::new(SimConfig::from_scenario(scenario)).is_err());
}

#[test]
fn test_reset_command_restores_scene() {
    let mut engine = engine_with(walled_scenario());
    engine.queue_command(PlayerCommand::SetThrottle { value: 1.0 });
    run(&mut engine, 30);
    let moved = engine.tick().player.unwrap().position;
    assert!(moved.z > 1.0);

    engine.queue_command(PlayerCommand::ResetScene);
    let snapshot = engine.tick();
    assert_eq!(snapshot.generation, 2);
    assert!(snapshot
        .events
        .contains(&GameEvent::SceneLoaded { generation: 2 }));
    let player = snapshot.player.unwrap();
    // Inputs are part of the scene and start released.
    assert_eq!(player.position, Vector3::ZERO);
    assert_eq!(engine.world().query::<&EnemyTurret>().iter().count(), 1);
}

#[test]
fn test_pause_freezes_time() {
    let mut engine = SimulationEngine::new(SimConfig::default()).unwrap();
    run(&mut engine, 10);
    engine.queue_command(PlayerCommand::Pause);
    let paused = engine.tick();
    assert_eq!(paused.phase, GamePhase::Paused);
    let frozen = paused.time.tick;
    run(&mut engine, 20);
    assert_eq!(engine.time().tick, frozen);

    engine.queue_command(PlayerCommand::Resume);
    let resumed = engine.tick();
    assert_eq!(resumed.phase, GamePhase::Active);
    assert_eq!(resumed.time.tick, frozen + 1);
}

// ---- Player tank ----

#[test]
fn test_throttle_drives_forward() {
    let mut engine = SimulationEngine::new(SimConfig::default()).unwrap();
    engine.queue_command(PlayerCommand::SetThrottle { value: 1.0 });
    run(&mut engine, 60);
    let player = engine.tick().player.unwrap();
    // Commands apply on the first tick, so 61 ticks of motion.
    assert_relative_eq!(player.position.z, TANK_SPEED * 61.0 * DT, epsilon = 1e-9);
    assert_relative_eq!(player.position.x, 0.0, epsilon = 1e-9);
}

#[test]
fn test_hull_turns_only_while_moving() {
    let mut engine = engine_with(walled_scenario());
    engine.queue_command(PlayerCommand::SetSteering { value: 1.0 });
    run(&mut engine, 30);
    assert_eq!(engine.tick().player.unwrap().hull_yaw_degrees, 0.0);

    engine.queue_command(PlayerCommand::SetThrottle { value: 0.5 });
    let player = engine.tick().player.unwrap();
    assert_relative_eq!(player.hull_yaw_degrees, TANK_TURN_SPEED * DT, epsilon = 1e-9);
}

#[test]
fn test_obstacle_stops_hull() {
    let mut engine = engine_with(walled_scenario());
    engine.queue_command(PlayerCommand::SetThrottle { value: 1.0 });
    run(&mut engine, 120);
    let player = engine.tick().player.unwrap();
    // Wall face at z = 8.
    assert!(player.position.z < 8.0);
    assert!(player.position.z > 7.5);
}

#[test]
fn test_cannon_elevation_clamped() {
    let mut engine = engine_with(walled_scenario());
    engine.queue_command(PlayerCommand::SetElevationInput { value: 1.0 });
    run(&mut engine, 120);
    assert_eq!(
        engine.tick().player.unwrap().elevation_degrees,
        CANNON_MAX_ELEVATION
    );

    engine.queue_command(PlayerCommand::SetElevationInput { value: -1.0 });
    run(&mut engine, 120);
    assert_eq!(
        engine.tick().player.unwrap().elevation_degrees,
        CANNON_MIN_ELEVATION
    );
}

#[test]
fn test_charge_shows_preview_and_release_fires() {
    let mut engine = engine_with(walled_scenario());
    engine.queue_command(PlayerCommand::SetElevationInput { value: 1.0 });
    // 27 ticks at 100°/s reaches 45°.
    run(&mut engine, 27);
    engine.queue_commands([
        PlayerCommand::SetElevationInput { value: 0.0 },
        PlayerCommand::BeginCharge,
    ]);
    let charging = engine.tick().player.unwrap();
    assert!(charging.charging);
    assert_relative_eq!(charging.elevation_degrees, 45.0, epsilon = 1e-9);
    assert_relative_eq!(
        charging.launch_speed,
        (SHELL_MAX_RANGE * GRAVITY).sqrt(),
        epsilon = 1e-9
    );
    assert!(charging.arc_preview.len() > 1);
    assert!(charging.arc_preview.len() <= PREVIEW_SAMPLE_COUNT + 1);

    engine.queue_command(PlayerCommand::ReleaseFire);
    let fired = engine.tick();
    let player = fired.player.unwrap();
    assert!(!player.charging);
    assert!(player.arc_preview.is_empty());
    assert_relative_eq!(
        player.reload_remaining,
        SHELL_MAX_RANGE / RELOAD_RANGE_DIVISOR - DT,
        epsilon = 1e-9
    );
    assert!(fired.events.iter().any(|e| matches!(
        e,
        GameEvent::ShotFired {
            faction: Faction::Player,
            kind: ProjectileKind::Shell,
            ..
        }
    )));
    assert!(fired
        .projectiles
        .iter()
        .any(|p| p.kind == ProjectileKind::Shell));

    // Still reloading: a second release does nothing.
    engine.queue_commands([PlayerCommand::BeginCharge, PlayerCommand::ReleaseFire]);
    let again = engine.tick();
    assert!(!again
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::ShotFired { faction: Faction::Player, .. })));
}

#[test]
fn test_player_shell_damages_turret() {
    let mut scenario = ScenarioConfig::default();
    scenario.obstacles.clear();
    let mut engine = engine_with(scenario);
    engine.tick();
    // A shallow elevation clears the ground and meets the turret's hit sphere.
    for (_, (_, turret)) in engine
        .world_mut()
        .query_mut::<(&PlayerTank, &mut TurretState)>()
    {
        turret.elevation_degrees = 5.0;
    }
    engine.queue_commands([PlayerCommand::BeginCharge, PlayerCommand::ReleaseFire]);
    let snapshots = run(&mut engine, 60);

    let hit = all_events(&snapshots).any(|e| {
        matches!(
            e,
            GameEvent::Hit {
                faction: Faction::Enemy,
                remaining_health: 2,
                ..
            }
        )
    });
    assert!(hit, "shell should strike the turret");
    assert_eq!(snapshots.last().unwrap().enemies[0].health, ENEMY_HEALTH - 1);
}

// ---- Enemy turrets ----

#[test]
fn test_turret_engages_visible_player() {
    let mut engine = SimulationEngine::new(SimConfig::default()).unwrap();
    let snapshots = run(&mut engine, 60);

    assert!(all_events(&snapshots).any(|e| matches!(e, GameEvent::TargetAcquired { .. })));
    assert!(all_events(&snapshots).any(|e| matches!(
        e,
        GameEvent::ShotFired {
            faction: Faction::Enemy,
            ..
        }
    )));
    assert!(player_health(&engine) < PLAYER_HEALTH);

    let enemy = &snapshots.last().unwrap().enemies[0];
    assert_eq!(enemy.mode, EngagementMode::Engaged);
    assert!(enemy.target_visible);
    // Turret faces the player.
    assert_relative_eq!(enemy.yaw_degrees, 180.0, epsilon = 1e-6);
}

#[test]
fn test_first_scan_waits_one_interval() {
    let mut engine = SimulationEngine::new(SimConfig::default()).unwrap();
    let snapshots = run(&mut engine, 12);
    let first_shot = snapshots.iter().position(|s| {
        s.events
            .iter()
            .any(|e| matches!(e, GameEvent::ShotFired { .. }))
    });
    // Scan clock at 0.2 s and 60 Hz: due on the 12th tick.
    assert_eq!(first_shot, Some(11));
}

#[test]
fn test_wall_blocks_turret() {
    let mut engine = engine_with(walled_scenario());
    let snapshots = run(&mut engine, 300);

    assert!(!all_events(&snapshots).any(|e| matches!(e, GameEvent::ShotFired { .. })));
    assert_eq!(player_health(&engine), PLAYER_HEALTH);
    let enemy = &snapshots.last().unwrap().enemies[0];
    assert_eq!(enemy.mode, EngagementMode::Searching);
    assert!(!enemy.target_visible);
}

#[test]
fn test_searching_turret_sweeps() {
    let mut engine = engine_with(walled_scenario());
    let before = engine.tick().enemies[0].yaw_degrees;
    run(&mut engine, 59);
    let after = engine.tick().enemies[0].yaw_degrees;
    assert_relative_eq!(
        (after - before).rem_euclid(360.0),
        DEFAULT_SWEEP_RATE_DEGREES * 60.0 * DT,
        epsilon = 1e-6
    );
}

#[test]
fn test_out_of_range_player_is_ignored() {
    let mut scenario = ScenarioConfig::default();
    scenario.enemies[0].position = Vector3::new(0.0, 0.0, DEFAULT_DETECTION_RADIUS + 5.0);
    let mut engine = engine_with(scenario);
    let snapshots = run(&mut engine, 120);
    assert!(!all_events(&snapshots).any(|e| matches!(e, GameEvent::TargetAcquired { .. })));
}

#[test]
fn test_rounds_expire() {
    let mut engine = SimulationEngine::new(SimConfig::default()).unwrap();
    run(&mut engine, 12);
    // Hold the player far away so the round flies free.
    for (_, (_, transform)) in engine
        .world_mut()
        .query_mut::<(&PlayerTank, &mut tankfire_core::components::Transform)>()
    {
        transform.position = Vector3::new(100.0, 0.0, 0.0);
    }
    let lifetime_ticks = (ENEMY_ROUND_LIFETIME_SECS / DT).ceil() as usize;
    run(&mut engine, lifetime_ticks + 1);
    assert_eq!(engine.world().query::<&Projectile>().iter().count(), 0);
}

// ---- Game over ----

#[test]
fn test_player_destruction_resets_scene() {
    let mut engine = SimulationEngine::new(SimConfig::default()).unwrap();
    let snapshots = run(&mut engine, 20 * TICK_RATE as usize);

    let game_over = snapshots.iter().position(|s| {
        s.events
            .iter()
            .any(|e| matches!(e, GameEvent::GameOver { .. }))
    });
    let game_over = game_over.expect("player should be destroyed");
    let over = &snapshots[game_over];
    assert_eq!(over.phase, GamePhase::GameOver);
    assert_eq!(over.hud.player_health, 0);
    assert!(over.player.as_ref().unwrap().destroyed);
    assert!(over.events.iter().any(|e| matches!(
        e,
        GameEvent::Destroyed {
            faction: Faction::Player,
            ..
        }
    )));

    let reload = snapshots.iter().position(|s| s.generation == 2).unwrap();
    let delay_ticks = (GAME_OVER_RESET_DELAY_SECS / DT).round() as usize;
    assert!((reload - game_over).abs_diff(delay_ticks) <= 1);
    assert_eq!(snapshots[reload].phase, GamePhase::Active);
    assert_eq!(snapshots[reload].hud.player_health, PLAYER_HEALTH);

    let game_overs = snapshots[..reload]
        .iter()
        .flat_map(|s| s.events.iter())
        .filter(|e| matches!(e, GameEvent::GameOver { .. }))
        .count();
    assert_eq!(game_overs, 1);
}
