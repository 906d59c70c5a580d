//! Skirmish collision core
//!
//! Collision detection and response for a real-time 3D shooter, built on a
//! component-based game-object model (hecs entities carrying [`Transform`],
//! [`Collider`], and the optional [`Movable`]/[`Pushable`] capabilities).
//!
//! # Architecture
//!
//! The collision pass runs once per simulation tick, synchronously:
//!
//! 1. Reset per-frame hit flags
//! 2. Broadphase: brute-force enumeration of registered collider pairs
//! 3. Narrowphase: SAT (15 axes) for box pairs, interval tests for
//!    axis-aligned pairs, closest-point tests for spheres
//! 4. Resolution: minimum translation vector, mass-weighted push split,
//!    inward velocity cancellation, collision events
//! 5. Accumulated pushes applied to owner positions
//!
//! Shapes are a closed sum type ([`ColliderShape`]): axis-aligned boxes,
//! oriented boxes following the owner's yaw/pitch/roll, and spheres. All
//! failure paths degrade to "no resolution this frame" - the pass never
//! aborts a tick.

pub mod collision;
pub mod ecs;
pub mod math;

// Re-export commonly used types
pub use collision::broadphase::ColliderRegistry;
pub use collision::collider::{BoxFrame, Collider, ColliderShape, WorldShape};
pub use collision::contact::{CollisionEvent, CollisionPair};
pub use collision::debug::{Color, DebugDraw, HIT_COLOR, IDLE_COLOR};
pub use collision::narrowphase::SatHit;
pub use collision::{CollisionConfig, CollisionWorld, RegisterError};
pub use ecs::components::motion::{Movable, Pushable};
pub use ecs::components::transform::Transform;
