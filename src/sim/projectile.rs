//! Projectiles fired by the player and by enemies

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::HitRegion;
use super::state::{Entity, EntityId};
use crate::{ms_to_secs, velocity_from_angle};

/// A straight-flying shot with a fixed time-to-live
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub id: EntityId,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Countdown until automatic destruction (ms)
    pub remaining_ms: f32,
    pub active: bool,
}

impl Projectile {
    pub fn new(id: EntityId, pos: Vec2, vel: Vec2, radius: f32, lifetime_ms: f32) -> Self {
        Self {
            id,
            pos,
            vel,
            radius,
            remaining_ms: lifetime_ms,
            active: lifetime_ms > 0.0,
        }
    }

    /// Spawn at `origin`, flying along `angle` at `speed`
    pub fn aimed(
        id: EntityId,
        origin: Vec2,
        angle: f32,
        speed: f32,
        radius: f32,
        lifetime_ms: f32,
    ) -> Self {
        Self::new(id, origin, velocity_from_angle(angle, speed), radius, lifetime_ms)
    }

    /// Move along the velocity and count down the TTL
    pub fn tick(&mut self, dt_ms: f32) {
        if !self.active {
            return;
        }
        self.pos += self.vel * ms_to_secs(dt_ms);
        self.remaining_ms -= dt_ms;
        if self.remaining_ms <= 0.0 {
            self.destroy();
        }
    }

    /// Deactivate; calling again is a no-op
    pub fn destroy(&mut self) {
        self.active = false;
    }

    pub fn hit_region(&self) -> HitRegion {
        HitRegion::circle(self.pos, self.radius)
    }
}

impl Entity for Projectile {
    fn id(&self) -> EntityId {
        self.id
    }

    fn pos(&self) -> Vec2 {
        self.pos
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

/// Tick every projectile, then keep only the ones still alive
pub fn tick_and_prune(projectiles: &mut Vec<Projectile>, dt_ms: f32) {
    for p in projectiles.iter_mut() {
        p.tick(dt_ms);
    }
    projectiles.retain(|p| p.active);
}
