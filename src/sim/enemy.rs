//! Pursuing enemies
//!
//! An enemy is bound at spawn time to one target (the player) by id. It
//! never holds the target itself: every tick the world resolves the id to
//! a position and hands it in. When the id no longer resolves the enemy
//! keeps its last heading for both movement and aim.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::HitRegion;
use super::projectile::{Projectile, tick_and_prune};
use super::state::{Entity, EntityId, PlayArea};
use crate::tuning::Tuning;
use crate::{angle_between, ms_to_secs, velocity_from_angle};

/// An enemy that chases its target and shoots at a fixed cadence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EntityId,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub active: bool,
    /// Movement speed (units/s)
    pub speed: f32,
    /// Projectile speed (units/s)
    pub bullet_speed: f32,
    pub bullet_radius: f32,
    pub bullet_lifetime_ms: f32,
    /// Time between shots (ms)
    pub shoot_interval_ms: f32,
    /// Countdown to the next shot (ms)
    pub shoot_cooldown_ms: f32,
    /// Last aim angle (radians), held when the target is unavailable
    pub heading: f32,
    /// Live projectiles, oldest first
    pub projectiles: Vec<Projectile>,
    target: EntityId,
}

impl Enemy {
    pub fn new(id: EntityId, pos: Vec2, target: EntityId, tuning: &Tuning) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::ZERO,
            radius: tuning.enemy_radius,
            active: true,
            speed: tuning.enemy_speed,
            bullet_speed: tuning.enemy_bullet_speed,
            bullet_radius: tuning.projectile_radius,
            bullet_lifetime_ms: tuning.projectile_lifetime_ms,
            shoot_interval_ms: tuning.enemy_shoot_interval_ms,
            shoot_cooldown_ms: tuning.enemy_shoot_interval_ms,
            heading: 0.0,
            projectiles: Vec::new(),
            target,
        }
    }

    /// Id of the entity this enemy chases (fixed for its lifetime)
    pub fn target(&self) -> EntityId {
        self.target
    }

    /// Advance one tick
    ///
    /// `target_pos` is the resolved position of [`Enemy::target`], or `None`
    /// if the target no longer exists. `next_id` allocates ids for any
    /// projectile fired this tick. Inactive enemies do nothing.
    pub fn tick(
        &mut self,
        dt_ms: f32,
        target_pos: Option<Vec2>,
        area: &PlayArea,
        next_id: &mut impl FnMut() -> EntityId,
    ) {
        if !self.active {
            return;
        }

        if let Some(target) = target_pos {
            self.heading = angle_between(self.pos, target);
        }
        self.vel = velocity_from_angle(self.heading, self.speed);
        self.pos += self.vel * ms_to_secs(dt_ms);
        self.pos = area.clamp_inset(self.pos, self.radius);

        tick_and_prune(&mut self.projectiles, dt_ms);

        self.shoot_cooldown_ms -= dt_ms;
        if self.shoot_cooldown_ms <= 0.0 {
            let aim = match target_pos {
                Some(target) => angle_between(self.pos, target),
                None => self.heading,
            };
            self.fire(aim, next_id());
            self.shoot_cooldown_ms = self.shoot_interval_ms;
        }
    }

    fn fire(&mut self, angle: f32, id: EntityId) {
        self.projectiles.push(Projectile::aimed(
            id,
            self.pos,
            angle,
            self.bullet_speed,
            self.bullet_radius,
            self.bullet_lifetime_ms,
        ));
    }

    /// Deactivate; a second call is a no-op. Returns whether this call
    /// did the destroying.
    pub fn mark_destroyed(&mut self) -> bool {
        let was_active = self.active;
        self.active = false;
        was_active
    }

    /// Hand over every in-flight projectile
    ///
    /// Shots already fired outlive the enemy that fired them.
    pub fn release_projectiles(&mut self) -> Vec<Projectile> {
        std::mem::take(&mut self.projectiles)
            .into_iter()
            .filter(|p| p.active)
            .collect()
    }

    pub fn hit_region(&self) -> HitRegion {
        HitRegion::circle(self.pos, self.radius)
    }
}

impl Entity for Enemy {
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
