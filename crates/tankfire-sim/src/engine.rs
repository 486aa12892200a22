//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, processes player commands,
//! runs all systems, and produces `GameStateSnapshot`s. Completely headless,
//! enabling deterministic testing.

use std::collections::VecDeque;

use hecs::World;
use tracing::{info, warn};

use tankfire_core::commands::PlayerCommand;
use tankfire_core::config::ScenarioConfig;
use tankfire_core::constants::{DEFAULT_SEED, DT, GAME_OVER_RESET_DELAY_SECS};
use tankfire_core::enums::GamePhase;
use tankfire_core::error::ConfigError;
use tankfire_core::events::GameEvent;
use tankfire_core::state::GameStateSnapshot;
use tankfire_core::types::SimTime;

use crate::arena::ArenaGeometry;
use crate::scene::SceneManager;
use crate::systems;
use crate::systems::player::axis;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    /// Overrides the scenario's own seed.
    pub seed: u64,
    pub scenario: ScenarioConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            scenario: ScenarioConfig::default(),
        }
    }
}

impl SimConfig {
    /// Use a scenario together with its own seed.
    pub fn from_scenario(scenario: ScenarioConfig) -> Self {
        Self {
            seed: scenario.seed,
            scenario,
        }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    phase: GamePhase,
    scene: SceneManager,
    arena: ArenaGeometry,
    gravity: f64,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    events: Vec<GameEvent>,
}

impl SimulationEngine {
    /// Create a new engine. The scene is built on the first tick.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        let mut scenario = config.scenario;
        scenario.seed = config.seed;
        scenario.validate()?;

        Ok(Self {
            world: World::new(),
            time: SimTime::default(),
            phase: GamePhase::default(),
            gravity: scenario.gravity,
            scene: SceneManager::new(scenario),
            arena: ArenaGeometry::default(),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
        })
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> GameStateSnapshot {
        if self.phase == GamePhase::Loading {
            self.load_scene();
        }

        self.process_commands();

        if matches!(self.phase, GamePhase::Active | GamePhase::GameOver) {
            self.run_systems();
            self.time.advance();
            if self.scene.tick(DT) {
                self.load_scene();
            }
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.phase,
            self.scene.generation(),
            events,
        )
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Number of scene loads so far.
    pub fn generation(&self) -> u32 {
        self.scene.generation()
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Get the static arena geometry of the current scene.
    pub fn arena(&self) -> &ArenaGeometry {
        &self.arena
    }

    /// Get a mutable reference to the ECS world (for tests that stage a situation).
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Build (or rebuild) the scene from the scenario.
    fn load_scene(&mut self) {
        let result = if self.scene.generation() == 0 {
            self.scene.init(&mut self.world)
        } else {
            self.scene.reset(&mut self.world)
        };

        match result {
            Ok(arena) => {
                self.arena = arena;
                self.phase = GamePhase::Active;
                self.events.push(GameEvent::SceneLoaded {
                    generation: self.scene.generation(),
                });
            }
            // Scenarios are validated up front, so this only trips on a
            // scenario that validates but cannot build a turret.
            Err(error) => warn!(%error, "scene load failed"),
        }
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::SetThrottle { value } => {
                systems::player::set_input(&mut self.world, |i| i.throttle = axis(value));
            }
            PlayerCommand::SetSteering { value } => {
                systems::player::set_input(&mut self.world, |i| i.steering = axis(value));
            }
            PlayerCommand::SetTurretInput { value } => {
                systems::player::set_input(&mut self.world, |i| i.turret = axis(value));
            }
            PlayerCommand::SetElevationInput { value } => {
                systems::player::set_input(&mut self.world, |i| i.elevation = axis(value));
            }
            PlayerCommand::BeginCharge => {
                if self.phase == GamePhase::Active {
                    systems::player::begin_charge(&mut self.world);
                }
            }
            PlayerCommand::ReleaseFire => {
                if self.phase == GamePhase::Active {
                    systems::player::release_fire(&mut self.world, self.gravity, &mut self.events);
                }
            }
            PlayerCommand::ResetScene => {
                info!("scene reset requested");
                self.load_scene();
            }
            PlayerCommand::Pause => {
                if self.phase == GamePhase::Active {
                    self.phase = GamePhase::Paused;
                }
            }
            PlayerCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Active;
                }
            }
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        // 1. Player hull, turret, cannon
        systems::player::run(&mut self.world, &self.arena, self.gravity, DT);
        // 2. Enemy turrets: sweep, scan, fire
        systems::enemy_ai::run(
            &mut self.world,
            &self.arena,
            self.gravity,
            DT,
            &mut self.events,
        );
        // 3. Projectile flight and collision
        let hits = systems::projectiles::run(
            &mut self.world,
            &self.arena,
            self.gravity,
            DT,
            &mut self.events,
            &mut self.despawn_buffer,
        );
        // 4. Damage and destruction
        let player_destroyed = systems::damage::run(&mut self.world, &hits, &mut self.events);
        if player_destroyed && self.phase != GamePhase::GameOver {
            info!(reset_in_secs = GAME_OVER_RESET_DELAY_SECS, "game over");
            self.phase = GamePhase::GameOver;
            self.scene.schedule_reset(GAME_OVER_RESET_DELAY_SECS);
            self.events.push(GameEvent::GameOver {
                reset_in_secs: GAME_OVER_RESET_DELAY_SECS,
            });
        }
        // 5. Cleanup (wrecks, out-of-bounds projectiles)
        systems::cleanup::run(&mut self.world, DT, &mut self.despawn_buffer);
    }
}
