//! Damage system: applies projectile hits to tank health.

use hecs::World;
use tracing::{debug, info};

use tankfire_core::components::{Allegiance, Destroyed, Health, Transform};
use tankfire_core::constants::DESTROY_DELAY_SECS;
use tankfire_core::enums::Faction;
use tankfire_core::events::GameEvent;

use super::projectiles::ProjectileHit;

/// Each hit removes one point of health. A tank reaching zero is marked
/// destroyed and will be removed after [`DESTROY_DELAY_SECS`]. Hits on an
/// already destroyed tank are ignored.
///
/// Returns true if the player tank was destroyed by these hits.
pub fn run(world: &mut World, hits: &[ProjectileHit], events: &mut Vec<GameEvent>) -> bool {
    let mut player_destroyed = false;

    for hit in hits {
        if world.get::<&Destroyed>(hit.target).is_ok() {
            continue;
        }
        let Ok(faction) = world.get::<&Allegiance>(hit.target).map(|a| a.0) else {
            continue;
        };
        let remaining = {
            let Ok(mut health) = world.get::<&mut Health>(hit.target) else {
                continue;
            };
            health.current = health.current.saturating_sub(1);
            health.current
        };

        debug!(?faction, shooter = ?hit.faction, remaining, "tank hit");
        events.push(GameEvent::Hit {
            faction,
            position: hit.point,
            remaining_health: remaining,
        });

        if remaining > 0 {
            continue;
        }

        let position = world
            .get::<&Transform>(hit.target)
            .map(|t| t.position)
            .unwrap_or(hit.point);
        let _ = world.insert_one(
            hit.target,
            Destroyed {
                despawn_in_secs: DESTROY_DELAY_SECS,
            },
        );
        info!(?faction, ?position, "tank destroyed");
        events.push(GameEvent::Destroyed { faction, position });

        if faction == Faction::Player {
            player_destroyed = true;
        }
    }

    player_destroyed
}
