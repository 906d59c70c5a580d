//! hecs ECS integration: the components the collision core reads and writes.

pub mod components;
