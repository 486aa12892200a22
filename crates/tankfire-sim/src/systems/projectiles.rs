//! Projectile flight and collision.
//!
//! Explicit Euler under gravity. Each step tests the segment just travelled
//! against the arena and every living tank's hit sphere (skipping the
//! shooter) and keeps the nearest contact.

use glam::DQuat;
use hecs::{Entity, World};

use tankfire_ballistics::RaycastTest;
use tankfire_core::components::*;
use tankfire_core::enums::Faction;
use tankfire_core::events::GameEvent;
use tankfire_core::types::{Vector3, UP};
use tankfire_engagement::fov::yaw_from_direction;
use tankfire_engagement::ProjectileSpawner;

use crate::arena::ArenaGeometry;

/// Spawns projectiles into the ECS world from a template.
pub struct WorldSpawner<'w> {
    world: &'w mut World,
    template: Projectile,
}

impl<'w> WorldSpawner<'w> {
    pub fn new(world: &'w mut World, template: Projectile) -> Self {
        Self { world, template }
    }
}

impl ProjectileSpawner for WorldSpawner<'_> {
    type Handle = Entity;

    fn spawn_projectile(&mut self, position: Vector3, rotation: DQuat, velocity: Vector3) -> Entity {
        let heading = rotation * Vector3::Z;
        self.world.spawn((
            self.template,
            Transform {
                position,
                yaw_degrees: yaw_from_direction(heading),
            },
            Velocity(velocity),
        ))
    }
}

/// A projectile striking a tank this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileHit {
    pub target: Entity,
    pub point: Vector3,
    /// Side of the shooter.
    pub faction: Faction,
}

/// Advance all projectiles by `dt` and report tank hits.
/// Projectiles that hit anything or expire are despawned.
pub fn run(
    world: &mut World,
    arena: &ArenaGeometry,
    gravity: f64,
    dt: f64,
    events: &mut Vec<GameEvent>,
    despawn_buffer: &mut Vec<Entity>,
) -> Vec<ProjectileHit> {
    despawn_buffer.clear();

    let targets: Vec<(Entity, Vector3, f64)> = world
        .query::<(&Transform, &HitSphere, Option<&Destroyed>)>()
        .iter()
        .filter(|(_, (_, _, destroyed))| destroyed.is_none())
        .map(|(entity, (transform, sphere, _))| {
            (entity, transform.position + UP * sphere.height, sphere.radius)
        })
        .collect();

    let mut hits = Vec::new();
    for (entity, (transform, velocity, projectile)) in
        world.query_mut::<(&mut Transform, &mut Velocity, &mut Projectile)>()
    {
        if let Some(lifetime) = projectile.lifetime_remaining.as_mut() {
            *lifetime -= dt;
            if *lifetime <= 0.0 {
                despawn_buffer.push(entity);
                continue;
            }
        }

        let start = transform.position;
        let end = start + velocity.0 * dt;
        velocity.0.y -= gravity * dt;

        let segment = end - start;
        let length = segment.length();
        if length < 1e-12 {
            continue;
        }
        let direction = segment / length;

        let surface = arena.raycast(start, direction, length);
        let tank = targets
            .iter()
            .filter(|(target, _, _)| target.to_bits().get() != projectile.owner)
            .filter_map(|&(target, center, radius)| {
                segment_sphere(start, direction, length, center, radius).map(|t| (target, t))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1));

        match (tank, surface) {
            (Some((target, t)), surface) if surface.map_or(true, |s| t <= s.distance) => {
                hits.push(ProjectileHit {
                    target,
                    point: start + direction * t,
                    faction: projectile.faction,
                });
                despawn_buffer.push(entity);
            }
            (_, Some(hit)) => {
                events.push(GameEvent::Impact {
                    position: hit.point,
                });
                despawn_buffer.push(entity);
            }
            _ => transform.position = end,
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
    hits
}

/// Distance along a segment to its first contact with a sphere.
/// A segment starting inside the sphere hits at 0.
fn segment_sphere(
    origin: Vector3,
    direction: Vector3,
    length: f64,
    center: Vector3,
    radius: f64,
) -> Option<f64> {
    let offset = origin - center;
    let b = offset.dot(direction);
    let c = offset.length_squared() - radius * radius;
    if c <= 0.0 {
        return Some(0.0);
    }
    if b > 0.0 {
        return None;
    }
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }
    let t = -b - discriminant.sqrt();
    (t <= length).then_some(t)
}
