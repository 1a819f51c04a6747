//! The player's avatar

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::HitRegion;
use super::projectile::{Projectile, tick_and_prune};
use super::state::{Entity, EntityId, PlayArea};
use crate::tuning::Tuning;
use crate::{angle_between, ms_to_secs};

/// Directional input held during a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

/// The player-controlled avatar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
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
    /// Live projectiles, oldest first
    pub projectiles: Vec<Projectile>,
}

impl Player {
    pub fn new(id: EntityId, pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::ZERO,
            radius: tuning.player_radius,
            active: true,
            speed: tuning.player_speed,
            bullet_speed: tuning.player_bullet_speed,
            bullet_radius: tuning.projectile_radius,
            bullet_lifetime_ms: tuning.projectile_lifetime_ms,
            projectiles: Vec::new(),
        }
    }

    /// Set velocity from held directions
    ///
    /// Each axis is independent and opposite directions held together
    /// cancel out. Diagonals are not normalized, so diagonal movement is
    /// √2 faster than straight movement.
    pub fn apply_input(&mut self, input: &MoveInput) {
        let axis = |neg: bool, pos: bool| (pos as i8 - neg as i8) as f32;
        self.vel = Vec2::new(
            axis(input.left, input.right),
            axis(input.up, input.down),
        ) * self.speed;
    }

    /// Fire a projectile from the current position toward `target`
    ///
    /// A target on top of the player fires along +x.
    pub fn shoot(&mut self, target: Vec2, id: EntityId) -> &Projectile {
        let angle = angle_between(self.pos, target);
        self.projectiles.push(Projectile::aimed(
            id,
            self.pos,
            angle,
            self.bullet_speed,
            self.bullet_radius,
            self.bullet_lifetime_ms,
        ));
        &self.projectiles[self.projectiles.len() - 1]
    }

    /// Integrate movement, keep inside the play area, update projectiles
    pub fn tick(&mut self, dt_ms: f32, area: &PlayArea) {
        self.pos += self.vel * ms_to_secs(dt_ms);
        self.pos = area.clamp_inset(self.pos, self.radius);
        tick_and_prune(&mut self.projectiles, dt_ms);
    }

    pub fn hit_region(&self) -> HitRegion {
        HitRegion::circle(self.pos, self.radius)
    }
}

impl Entity for Player {
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
