//! Data-driven game balance
//!
//! Every balance constant the simulation reads lives here so a host can
//! load a JSON file instead of recompiling. Missing fields fall back to
//! the values in [`crate::consts`].

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Balance and play-area parameters for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Play area ===
    /// Width of the play area (spawn bounds, clamping)
    pub width: f32,
    /// Height of the play area
    pub height: f32,

    // === Player ===
    pub player_speed: f32,
    pub player_bullet_speed: f32,
    pub player_radius: f32,

    // === Enemies ===
    pub enemy_speed: f32,
    pub enemy_bullet_speed: f32,
    pub enemy_radius: f32,
    /// Delay between enemy shots (ms)
    pub enemy_shoot_interval_ms: f32,

    // === Projectiles ===
    pub projectile_radius: f32,
    /// Time-to-live of every projectile (ms)
    pub projectile_lifetime_ms: f32,

    // === Spawning / difficulty ===
    /// Initial delay between enemy spawns (ms)
    pub spawn_interval_ms: f32,
    /// Spawn interval never drops below this (ms)
    pub min_spawn_interval_ms: f32,
    /// Amount the spawn interval shrinks per difficulty step (ms)
    pub spawn_interval_step_ms: f32,
    /// Elapsed game time between difficulty steps (ms)
    pub difficulty_period_ms: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            width: PLAY_WIDTH,
            height: PLAY_HEIGHT,

            player_speed: PLAYER_SPEED,
            player_bullet_speed: PLAYER_BULLET_SPEED,
            player_radius: PLAYER_RADIUS,

            enemy_speed: ENEMY_SPEED,
            enemy_bullet_speed: ENEMY_BULLET_SPEED,
            enemy_radius: ENEMY_RADIUS,
            enemy_shoot_interval_ms: ENEMY_SHOOT_INTERVAL_MS,

            projectile_radius: PROJECTILE_RADIUS,
            projectile_lifetime_ms: PROJECTILE_LIFETIME_MS,

            spawn_interval_ms: SPAWN_INTERVAL_MS,
            min_spawn_interval_ms: MIN_SPAWN_INTERVAL_MS,
            spawn_interval_step_ms: SPAWN_INTERVAL_STEP_MS,
            difficulty_period_ms: DIFFICULTY_PERIOD_MS,
        }
    }
}

impl Tuning {
    /// Tuning with a custom play area, everything else default
    pub fn with_play_area(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Centre of the play area (player spawn point)
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Parse tuning from JSON. Absent fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning: Self = serde_json::from_str(json)?;
        Ok(tuning.sanitized())
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load tuning from a JSON file, falling back to defaults on any error
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning
                }
                Err(e) => {
                    log::warn!("Invalid tuning file {}: {}, using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Clamp values the simulation relies on being sane
    ///
    /// Non-positive intervals would make the spawn and shoot timers fire
    /// every tick, so they are pinned to at least 1 ms.
    pub fn sanitized(mut self) -> Self {
        self.width = self.width.max(1.0);
        self.height = self.height.max(1.0);
        self.enemy_shoot_interval_ms = self.enemy_shoot_interval_ms.max(1.0);
        self.projectile_lifetime_ms = self.projectile_lifetime_ms.max(0.0);
        self.min_spawn_interval_ms = self.min_spawn_interval_ms.max(1.0);
        self.spawn_interval_ms = self.spawn_interval_ms.max(self.min_spawn_interval_ms);
        self.spawn_interval_step_ms = self.spawn_interval_step_ms.max(0.0);
        self.difficulty_period_ms = self.difficulty_period_ms.max(1.0);
        self
    }
}
