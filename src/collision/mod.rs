//! Collision detection and response.
//!
//! # Frame pass
//!
//! [`CollisionWorld::step`] runs once per simulation tick, synchronously:
//!
//! 1. Reset every registered collider's hit flag
//! 2. Broad phase: enumerate all unordered candidate pairs
//! 3. Narrow phase: SAT / interval / closest-point test per shape combination
//! 4. Resolve: minimum translation vector, mass-weighted push split, inward
//!    velocity cancellation, collision events
//! 5. Apply accumulated pushes to owner positions, once per object

pub mod broadphase;
pub mod collider;
pub mod contact;
pub mod debug;
pub mod narrowphase;
pub mod resolve;

use glam::Vec3;
use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::ecs::components::motion::{Movable, Pushable};
use crate::ecs::components::transform::Transform;
use crate::math::AXIS_EPSILON;

use self::broadphase::ColliderRegistry;
use self::collider::{Collider, WorldShape};
use self::contact::{CollisionEvent, CollisionPair};

/// Configuration for the collision pass.
#[derive(Debug, Clone)]
pub struct CollisionConfig {
    /// Maximum push magnitude for box-box resolution. Default: 50.0.
    pub push_clamp: f32,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self { push_clamp: 50.0 }
    }
}

/// Why an entity was refused registration.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RegisterError {
    #[error("entity is not alive")]
    Dead,
    #[error("entity has no collider component")]
    MissingCollider,
    #[error("entity has no transform; a collider needs an owner in space")]
    MissingTransform,
}

/// The collision manager: registry, per-frame pair list, and event queue.
///
/// Owned by the simulation context and handed the `hecs::World` each tick;
/// multiple instances can coexist (separate arenas, tests).
pub struct CollisionWorld {
    config: CollisionConfig,
    registry: ColliderRegistry,
    pairs: Vec<CollisionPair>,
    events: Vec<CollisionEvent>,
}

impl CollisionWorld {
    pub fn new(config: CollisionConfig) -> Self {
        Self {
            config,
            registry: ColliderRegistry::new(),
            pairs: Vec::new(),
            events: Vec::new(),
        }
    }

    pub fn registry(&self) -> &ColliderRegistry {
        &self.registry
    }

    /// Register an entity's collider for the collision pass.
    ///
    /// Refuses entities without a [`Collider`] or [`Transform`]. Registering
    /// an already-registered entity keeps a single entry.
    pub fn register(
        &mut self,
        world: &hecs::World,
        entity: hecs::Entity,
    ) -> Result<(), RegisterError> {
        if !world.contains(entity) {
            return Err(RegisterError::Dead);
        }
        if world.get::<&Collider>(entity).is_err() {
            return Err(RegisterError::MissingCollider);
        }
        if world.get::<&Transform>(entity).is_err() {
            return Err(RegisterError::MissingTransform);
        }
        self.registry.insert(entity);
        Ok(())
    }

    /// Remove an entity from the registry. Removing an absent entity is a
    /// no-op.
    pub fn unregister(&mut self, entity: hecs::Entity) {
        self.registry.remove(entity);
    }

    /// Enable or disable an entity's collider.
    ///
    /// Disabling deregisters immediately. Enabling only flips the flag; the
    /// caller re-registers explicitly via [`register`](Self::register).
    pub fn set_enabled(&mut self, world: &mut hecs::World, entity: hecs::Entity, enabled: bool) {
        if let Ok(mut collider) = world.get::<&mut Collider>(entity) {
            collider.enabled = enabled;
        }
        if !enabled {
            self.registry.remove(entity);
        }
    }

    /// Drain the collision events produced by the last [`step`](Self::step).
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, CollisionEvent> {
        self.events.drain(..)
    }

    /// Run one full collision pass over the world.
    pub fn step(&mut self, world: &mut hecs::World) {
        self.reset_hits(world);

        let candidates = self.registry.candidate_pairs(world);
        let candidate_count = candidates.len();

        self.pairs.clear();
        for (a, b) in candidates {
            let (Some(shape_a), Some(shape_b)) = (world_shape(world, a), world_shape(world, b))
            else {
                continue;
            };
            if narrowphase::intersects(&shape_a, &shape_b) {
                self.pairs.push(CollisionPair {
                    a,
                    b,
                    shape_a,
                    shape_b,
                });
            }
        }

        let mut resolved = 0usize;
        for i in 0..self.pairs.len() {
            let pair = self.pairs[i];
            if self.resolve_pair(world, &pair) {
                resolved += 1;
            }
        }

        apply_pushes(world);

        trace!(
            candidates = candidate_count,
            hits = self.pairs.len(),
            resolved,
            "collision pass"
        );
    }

    fn reset_hits(&self, world: &mut hecs::World) {
        for &entity in self.registry.entries() {
            if let Ok(mut collider) = world.get::<&mut Collider>(entity) {
                collider.hit = false;
            }
        }
    }

    /// Resolve a single recorded pair. Returns whether a response was applied.
    fn resolve_pair(&mut self, world: &mut hecs::World, pair: &CollisionPair) -> bool {
        let Some(push_a) = resolve::resolve(&pair.shape_a, &pair.shape_b, self.config.push_clamp)
        else {
            debug!(a = ?pair.a, b = ?pair.b, "hit pair without translation vector; skipping");
            return false;
        };

        let inv_a = inverse_mass(world, pair.a);
        let inv_b = inverse_mass(world, pair.b);
        let inv_sum = inv_a + inv_b;
        if inv_sum <= f32::EPSILON {
            debug!(a = ?pair.a, b = ?pair.b, "both sides immovable; pair skipped");
            return false;
        }

        // Lighter objects absorb a larger share of the correction.
        let weight_a = inv_a / inv_sum;
        let weight_b = inv_b / inv_sum;
        if weight_a > 0.0 {
            if let Ok(mut pushable) = world.get::<&mut Pushable>(pair.a) {
                pushable.add_push(push_a * weight_a);
            }
        }
        if weight_b > 0.0 {
            if let Ok(mut pushable) = world.get::<&mut Pushable>(pair.b) {
                pushable.add_push(-push_a * weight_b);
            }
        }

        let normal_a = push_a.normalize_or_zero();
        cancel_inward_velocity(world, pair.a, normal_a);
        cancel_inward_velocity(world, pair.b, -normal_a);

        if let Ok(mut collider) = world.get::<&mut Collider>(pair.a) {
            collider.hit = true;
        }
        if let Ok(mut collider) = world.get::<&mut Collider>(pair.b) {
            collider.hit = true;
        }

        self.events.push(CollisionEvent {
            entity: pair.a,
            other: pair.b,
        });
        self.events.push(CollisionEvent {
            entity: pair.b,
            other: pair.a,
        });
        true
    }
}

impl Default for CollisionWorld {
    fn default() -> Self {
        Self::new(CollisionConfig::default())
    }
}

fn world_shape(world: &hecs::World, entity: hecs::Entity) -> Option<WorldShape> {
    let collider = world.get::<&Collider>(entity).ok()?;
    let transform = world.get::<&Transform>(entity).ok()?;
    Some(collider.world_shape(&transform))
}

/// Inverse mass used for the push split. Static colliders and objects without
/// a usable pushable capability count as infinite mass.
fn inverse_mass(world: &hecs::World, entity: hecs::Entity) -> f32 {
    let is_static = world
        .get::<&Collider>(entity)
        .map(|c| c.is_static)
        .unwrap_or(true);
    if is_static {
        return 0.0;
    }

    match world.get::<&Pushable>(entity) {
        Ok(pushable) if pushable.mass > 0.0 => 1.0 / pushable.mass,
        Ok(_) => 0.0,
        Err(_) => {
            warn!(
                ?entity,
                "dynamic collider without pushable capability; correction lands on the other side"
            );
            0.0
        }
    }
}

/// Remove the velocity component pointing into the contact, leaving motion
/// along the surface untouched.
fn cancel_inward_velocity(world: &mut hecs::World, entity: hecs::Entity, normal: Vec3) {
    if normal.length_squared() < AXIS_EPSILON {
        return;
    }
    if let Ok(mut movable) = world.get::<&mut Movable>(entity) {
        let inward = movable.velocity.dot(normal);
        if inward < 0.0 {
            movable.velocity -= normal * inward;
        }
    }
}

/// Apply every accumulated push to its owner's position, once, then clear.
fn apply_pushes(world: &mut hecs::World) {
    for (_, (transform, pushable)) in world.query_mut::<(&mut Transform, &mut Pushable)>() {
        if let Some(push) = pushable.take_push() {
            transform.position += push;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::collider::ColliderShape;
    use super::*;

    fn aabb(extents: Vec3) -> Collider {
        Collider::new(ColliderShape::Aabb { extents })
    }

    fn spawn_box(
        world: &mut hecs::World,
        collision: &mut CollisionWorld,
        position: Vec3,
        mass: f32,
    ) -> hecs::Entity {
        let entity = world.spawn((
            Transform::from_position(position),
            aabb(Vec3::splat(2.0)),
            Pushable::new(mass),
            Movable::default(),
        ));
        collision.register(world, entity).unwrap();
        entity
    }

    fn position(world: &hecs::World, entity: hecs::Entity) -> Vec3 {
        world.get::<&Transform>(entity).unwrap().position
    }

    #[test]
    fn test_equal_masses_split_evenly() {
        let mut world = hecs::World::new();
        let mut collision = CollisionWorld::default();

        // Overlap on x is 0.5; each side moves 0.25.
        let a = spawn_box(&mut world, &mut collision, Vec3::ZERO, 1.0);
        let b = spawn_box(&mut world, &mut collision, Vec3::new(1.5, 0.0, 0.0), 1.0);

        collision.step(&mut world);

        let eps = 1e-5;
        assert!((position(&world, a) - Vec3::new(-0.25, 0.0, 0.0)).length() < eps);
        assert!((position(&world, b) - Vec3::new(1.75, 0.0, 0.0)).length() < eps);
    }

    #[test]
    fn test_mass_weighted_split() {
        let mut world = hecs::World::new();
        let mut collision = CollisionWorld::default();

        // massA = 1, massB = 3: A takes 0.75 of the correction, B takes 0.25.
        let a = spawn_box(&mut world, &mut collision, Vec3::ZERO, 1.0);
        let b = spawn_box(&mut world, &mut collision, Vec3::new(1.5, 0.0, 0.0), 3.0);

        collision.step(&mut world);

        let eps = 1e-5;
        assert!((position(&world, a) - Vec3::new(-0.375, 0.0, 0.0)).length() < eps);
        assert!((position(&world, b) - Vec3::new(1.625, 0.0, 0.0)).length() < eps);
    }

    #[test]
    fn test_static_collider_is_immune() {
        let mut world = hecs::World::new();
        let mut collision = CollisionWorld::default();

        let wall = world.spawn((
            Transform::identity(),
            Collider::new_static(ColliderShape::Aabb {
                extents: Vec3::splat(2.0),
            }),
        ));
        collision.register(&world, wall).unwrap();
        let mover = spawn_box(&mut world, &mut collision, Vec3::new(1.5, 0.0, 0.0), 1.0);

        collision.step(&mut world);

        let eps = 1e-5;
        assert_eq!(position(&world, wall), Vec3::ZERO);
        assert!((position(&world, mover) - Vec3::new(2.0, 0.0, 0.0)).length() < eps);
    }

    #[test]
    fn test_both_static_pair_is_suppressed() {
        let mut world = hecs::World::new();
        let mut collision = CollisionWorld::default();

        for x in [0.0, 1.5] {
            let e = world.spawn((
                Transform::from_position(Vec3::new(x, 0.0, 0.0)),
                Collider::new_static(ColliderShape::Aabb {
                    extents: Vec3::splat(2.0),
                }),
            ));
            collision.register(&world, e).unwrap();
        }

        collision.step(&mut world);

        assert_eq!(collision.drain_events().count(), 0);
        for (_, collider) in world.query_mut::<&Collider>() {
            assert!(!collider.hit());
        }
    }

    #[test]
    fn test_missing_pushable_degrades_to_one_sided() {
        let mut world = hecs::World::new();
        let mut collision = CollisionWorld::default();

        let bare = world.spawn((Transform::identity(), aabb(Vec3::splat(2.0))));
        collision.register(&world, bare).unwrap();
        let mover = spawn_box(&mut world, &mut collision, Vec3::new(1.5, 0.0, 0.0), 1.0);

        collision.step(&mut world);

        let eps = 1e-5;
        assert_eq!(position(&world, bare), Vec3::ZERO);
        assert!((position(&world, mover) - Vec3::new(2.0, 0.0, 0.0)).length() < eps);
        // The pair still resolved: events on both sides.
        assert_eq!(collision.drain_events().count(), 2);
    }

    #[test]
    fn test_inward_velocity_cancelled_tangent_kept() {
        let mut world = hecs::World::new();
        let mut collision = CollisionWorld::default();

        let _a = spawn_box(&mut world, &mut collision, Vec3::ZERO, 1.0);
        let b = spawn_box(&mut world, &mut collision, Vec3::new(1.5, 0.0, 0.0), 1.0);
        world.get::<&mut Movable>(b).unwrap().velocity = Vec3::new(-3.0, 2.0, 0.0);

        collision.step(&mut world);

        let velocity = world.get::<&Movable>(b).unwrap().velocity;
        let eps = 1e-5;
        assert!(velocity.x.abs() < eps, "inward component kept: {velocity}");
        assert!((velocity.y - 2.0).abs() < eps, "tangent lost: {velocity}");
    }

    #[test]
    fn test_events_emitted_for_both_sides() {
        let mut world = hecs::World::new();
        let mut collision = CollisionWorld::default();

        let a = spawn_box(&mut world, &mut collision, Vec3::ZERO, 1.0);
        let b = spawn_box(&mut world, &mut collision, Vec3::new(1.5, 0.0, 0.0), 1.0);

        collision.step(&mut world);

        let events: Vec<_> = collision.drain_events().collect();
        assert_eq!(events.len(), 2);
        assert!(events.contains(&CollisionEvent { entity: a, other: b }));
        assert!(events.contains(&CollisionEvent { entity: b, other: a }));
    }

    #[test]
    fn test_hit_flags_set_and_reset() {
        let mut world = hecs::World::new();
        let mut collision = CollisionWorld::default();

        let a = spawn_box(&mut world, &mut collision, Vec3::ZERO, 1.0);
        let b = spawn_box(&mut world, &mut collision, Vec3::new(1.5, 0.0, 0.0), 1.0);

        collision.step(&mut world);
        assert!(world.get::<&Collider>(a).unwrap().hit());
        assert!(world.get::<&Collider>(b).unwrap().hit());

        // Move them apart; next pass clears the flags.
        world.get::<&mut Transform>(b).unwrap().position = Vec3::new(10.0, 0.0, 0.0);
        collision.step(&mut world);
        assert!(!world.get::<&Collider>(a).unwrap().hit());
        assert!(!world.get::<&Collider>(b).unwrap().hit());
    }

    #[test]
    fn test_simultaneous_pushes_accumulate() {
        let mut world = hecs::World::new();
        let mut collision = CollisionWorld::default();

        // The middle box is squeezed symmetrically; its corrections cancel.
        let middle = spawn_box(&mut world, &mut collision, Vec3::ZERO, 1.0);
        let left = spawn_box(&mut world, &mut collision, Vec3::new(-1.5, 0.0, 0.0), 1.0);
        let right = spawn_box(&mut world, &mut collision, Vec3::new(1.5, 0.0, 0.0), 1.0);

        collision.step(&mut world);

        let eps = 1e-5;
        assert!(position(&world, middle).length() < eps);
        assert!(position(&world, left).x < -1.5);
        assert!(position(&world, right).x > 1.5);
    }

    #[test]
    fn test_register_refusals() {
        let mut world = hecs::World::new();
        let mut collision = CollisionWorld::default();

        let no_collider = world.spawn((Transform::identity(),));
        assert_eq!(
            collision.register(&world, no_collider),
            Err(RegisterError::MissingCollider)
        );

        let no_transform = world.spawn((aabb(Vec3::ONE),));
        assert_eq!(
            collision.register(&world, no_transform),
            Err(RegisterError::MissingTransform)
        );

        let doomed = world.spawn((Transform::identity(), aabb(Vec3::ONE)));
        world.despawn(doomed).unwrap();
        assert_eq!(collision.register(&world, doomed), Err(RegisterError::Dead));

        assert!(collision.registry().is_empty());
    }

    #[test]
    fn test_double_registration_keeps_one_entry() {
        let mut world = hecs::World::new();
        let mut collision = CollisionWorld::default();

        let a = spawn_box(&mut world, &mut collision, Vec3::ZERO, 1.0);
        collision.register(&world, a).unwrap();
        let _b = spawn_box(&mut world, &mut collision, Vec3::new(1.5, 0.0, 0.0), 1.0);

        collision.step(&mut world);

        // One pair, two events; a duplicate entry would double both.
        assert_eq!(collision.drain_events().count(), 2);
    }

    #[test]
    fn test_disable_deregisters() {
        let mut world = hecs::World::new();
        let mut collision = CollisionWorld::default();

        let a = spawn_box(&mut world, &mut collision, Vec3::ZERO, 1.0);
        let _b = spawn_box(&mut world, &mut collision, Vec3::new(1.5, 0.0, 0.0), 1.0);

        collision.set_enabled(&mut world, a, false);
        assert!(!collision.registry().contains(a));

        collision.step(&mut world);
        assert_eq!(collision.drain_events().count(), 0);

        // Re-enabling does not re-register by itself.
        collision.set_enabled(&mut world, a, true);
        collision.step(&mut world);
        assert_eq!(collision.drain_events().count(), 0);

        collision.register(&world, a).unwrap();
        collision.step(&mut world);
        assert_eq!(collision.drain_events().count(), 2);
    }

    #[test]
    fn test_despawned_entity_skipped() {
        let mut world = hecs::World::new();
        let mut collision = CollisionWorld::default();

        let a = spawn_box(&mut world, &mut collision, Vec3::ZERO, 1.0);
        let _b = spawn_box(&mut world, &mut collision, Vec3::new(1.5, 0.0, 0.0), 1.0);
        world.despawn(a).unwrap();

        collision.step(&mut world);
        assert_eq!(collision.drain_events().count(), 0);
    }

    #[test]
    fn test_independent_worlds_coexist() {
        let mut world_one = hecs::World::new();
        let mut world_two = hecs::World::new();
        let mut collision_one = CollisionWorld::default();
        let mut collision_two = CollisionWorld::default();

        spawn_box(&mut world_one, &mut collision_one, Vec3::ZERO, 1.0);
        spawn_box(
            &mut world_one,
            &mut collision_one,
            Vec3::new(1.5, 0.0, 0.0),
            1.0,
        );
        spawn_box(&mut world_two, &mut collision_two, Vec3::ZERO, 1.0);

        collision_one.step(&mut world_one);
        collision_two.step(&mut world_two);

        assert_eq!(collision_one.drain_events().count(), 2);
        assert_eq!(collision_two.drain_events().count(), 0);
    }

    #[test]
    fn test_sphere_ejected_from_box_through_manager() {
        let mut world = hecs::World::new();
        let mut collision = CollisionWorld::default();

        let wall = world.spawn((
            Transform::identity(),
            Collider::new_static(ColliderShape::Obb {
                extents: Vec3::splat(1.0),
            }),
        ));
        collision.register(&world, wall).unwrap();

        let radius = 1.0;
        let projectile = world.spawn((
            Transform::identity(),
            Collider::new(ColliderShape::Sphere { radius }),
            Pushable::new(1.0),
            Movable::default(),
        ));
        collision.register(&world, projectile).unwrap();

        collision.step(&mut world);

        // Pushed through the nearest face by face distance + radius, so it
        // ends fully outside the box.
        let center = position(&world, projectile);
        assert!((center.length() - 1.5).abs() < 1e-5);
    }
}
