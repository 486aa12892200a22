//! Scene lifecycle: initial load, immediate reset, and delayed reset.
//!
//! Owned by the engine. Every load rebuilds the world from the scenario
//! with a fresh RNG seeded from the scenario seed, so resets are exact
//! replays of the first load.

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

use tankfire_core::config::ScenarioConfig;
use tankfire_core::error::ConfigError;

use crate::arena::ArenaGeometry;
use crate::world_setup;

#[derive(Debug, Clone)]
pub struct SceneManager {
    scenario: ScenarioConfig,
    generation: u32,
    reset_countdown: Option<f64>,
}

impl SceneManager {
    pub fn new(scenario: ScenarioConfig) -> Self {
        Self {
            scenario,
            generation: 0,
            reset_countdown: None,
        }
    }

    /// Number of completed loads.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Seconds until a scheduled reset, if one is armed.
    pub fn pending_reset(&self) -> Option<f64> {
        self.reset_countdown
    }

    /// Build the scene into `world`, which is expected to be empty.
    pub fn init(&mut self, world: &mut World) -> Result<ArenaGeometry, ConfigError> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.scenario.seed);
        let arena = world_setup::setup_scene(world, &self.scenario, &mut rng)?;
        self.generation += 1;
        self.reset_countdown = None;
        info!(generation = self.generation, seed = self.scenario.seed, "scene loaded");
        Ok(arena)
    }

    /// Clear `world` and build the scene again.
    pub fn reset(&mut self, world: &mut World) -> Result<ArenaGeometry, ConfigError> {
        world.clear();
        self.init(world)
    }

    /// Arm a reset `delay_secs` from now. An already armed reset keeps its deadline.
    pub fn schedule_reset(&mut self, delay_secs: f64) {
        if self.reset_countdown.is_none() {
            info!(delay_secs, "scene reset scheduled");
            self.reset_countdown = Some(delay_secs.max(0.0));
        }
    }

    /// Advance the reset countdown. Returns true once when it expires.
    pub fn tick(&mut self, dt: f64) -> bool {
        let Some(remaining) = self.reset_countdown else {
            return false;
        };
        let remaining = remaining - dt.max(0.0);
        if remaining <= 1e-9 {
            self.reset_countdown = None;
            true
        } else {
            self.reset_countdown = Some(remaining);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tankfire_core::components::{EnemyTurret, PlayerTank};

    #[test]
    fn test_init_counts_generations() {
        let mut scene = SceneManager::new(ScenarioConfig::default());
        let mut world = World::new();
        let arena = scene.init(&mut world).unwrap();
        assert_eq!(scene.generation(), 1);
        assert_eq!(arena.obstacles().len(), 1);
        assert_eq!(world.query::<&PlayerTank>().iter().count(), 1);
        assert_eq!(world.query::<&EnemyTurret>().iter().count(), 1);

        scene.reset(&mut world).unwrap();
        assert_eq!(scene.generation(), 2);
        assert_eq!(world.query::<&PlayerTank>().iter().count(), 1);
        assert_eq!(world.query::<&EnemyTurret>().iter().count(), 1);
    }

    #[test]
    fn test_scheduled_reset_fires_once() {
        let mut scene = SceneManager::new(ScenarioConfig::default());
        scene.schedule_reset(0.5);
        scene.schedule_reset(10.0);
        assert!(!scene.tick(0.3));
        assert!(scene.tick(0.2));
        assert!(!scene.tick(1.0));
        assert_eq!(scene.pending_reset(), None);
    }

    #[test]
    fn test_unarmed_tick_is_noop() {
        let mut scene = SceneManager::new(ScenarioConfig::default());
        assert!(!scene.tick(100.0));
    }
}
