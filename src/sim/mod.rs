//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only advances through `World::advance`
//! - Seeded RNG only
//! - Stable iteration order (spawn order / entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod enemy;
pub mod player;
pub mod projectile;
pub mod snapshot;
pub mod state;
pub mod tick;

#[cfg(test)]
mod tests;

pub use collision::{CollisionChecker, GeometricOverlap, HitRegion};
pub use enemy::Enemy;
pub use player::{MoveInput, Player};
pub use projectile::Projectile;
pub use snapshot::{EnemyView, PlayerView, ProjectileView, WorldSnapshot};
pub use state::{
    Entity, EntityId, GameEvent, GamePhase, PlayArea, Session, SpawnEdge, World, live,
};
pub use tick::TickInput;
