//! Collider registry and brute-force pair enumeration.

use tracing::debug;

use crate::ecs::components::transform::Transform;

use super::collider::Collider;

/// Registry of the entities participating in collision this frame.
///
/// Entries are generational `hecs::Entity` handles, so a despawned owner
/// simply fails component lookup and is skipped; stale entries can never be
/// dereferenced.
#[derive(Debug, Default)]
pub struct ColliderRegistry {
    entries: Vec<hecs::Entity>,
}

impl ColliderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[hecs::Entity] {
        &self.entries
    }

    pub fn contains(&self, entity: hecs::Entity) -> bool {
        self.entries.contains(&entity)
    }

    /// Add an entity. Duplicates keep a single entry.
    ///
    /// Returns false if the entity was already registered.
    pub fn insert(&mut self, entity: hecs::Entity) -> bool {
        if self.contains(entity) {
            return false;
        }
        self.entries.push(entity);
        true
    }

    /// Remove an entity. Removing an absent entity is a no-op.
    pub fn remove(&mut self, entity: hecs::Entity) -> bool {
        if let Some(index) = self.entries.iter().position(|&e| e == entity) {
            self.entries.swap_remove(index);
            true
        } else {
            false
        }
    }

    /// Enumerate all unordered pairs of registered, enabled colliders whose
    /// owners are alive and placed in the world.
    ///
    /// O(n^2) brute force - sufficient for the entity counts of a single
    /// arena.
    pub fn candidate_pairs(&self, world: &hecs::World) -> Vec<(hecs::Entity, hecs::Entity)> {
        let mut live: Vec<hecs::Entity> = Vec::with_capacity(self.entries.len());

        for &entity in &self.entries {
            let Ok(collider) = world.get::<&Collider>(entity) else {
                debug!(?entity, "registered entity has no collider; skipping");
                continue;
            };
            if !collider.enabled {
                continue;
            }
            if world.get::<&Transform>(entity).is_err() {
                debug!(?entity, "collider has no owner transform; skipping");
                continue;
            }
            live.push(entity);
        }

        let mut pairs = Vec::new();
        for i in 0..live.len() {
            for j in (i + 1)..live.len() {
                pairs.push((live[i], live[j]));
            }
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::collider::ColliderShape;
    use glam::Vec3;

    fn unit_box() -> Collider {
        Collider::new(ColliderShape::Aabb {
            extents: Vec3::splat(2.0),
        })
    }

    #[test]
    fn test_insert_is_idempotent() {
        let mut world = hecs::World::new();
        let entity = world.spawn((Transform::identity(), unit_box()));

        let mut registry = ColliderRegistry::new();
        assert!(registry.insert(entity));
        assert!(!registry.insert(entity));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut world = hecs::World::new();
        let entity = world.spawn((Transform::identity(), unit_box()));

        let mut registry = ColliderRegistry::new();
        assert!(!registry.remove(entity));
        registry.insert(entity);
        assert!(registry.remove(entity));
        assert!(!registry.remove(entity));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_candidate_pairs_all_unordered_pairs() {
        let mut world = hecs::World::new();
        let mut registry = ColliderRegistry::new();
        for _ in 0..4 {
            let e = world.spawn((Transform::identity(), unit_box()));
            registry.insert(e);
        }
        let pairs = registry.candidate_pairs(&world);
        assert_eq!(pairs.len(), 6);
    }

    #[test]
    fn test_candidate_pairs_skip_disabled_and_dead() {
        let mut world = hecs::World::new();
        let mut registry = ColliderRegistry::new();

        let alive = world.spawn((Transform::identity(), unit_box()));
        let disabled = world.spawn((Transform::identity(), {
            let mut c = unit_box();
            c.enabled = false;
            c
        }));
        let doomed = world.spawn((Transform::identity(), unit_box()));
        let unplaced = world.spawn((unit_box(),));

        for e in [alive, disabled, doomed, unplaced] {
            registry.insert(e);
        }
        world.despawn(doomed).unwrap();

        // Only one live, enabled, placed collider remains: no pairs.
        assert!(registry.candidate_pairs(&world).is_empty());
        assert_eq!(registry.len(), 4);
    }
}
