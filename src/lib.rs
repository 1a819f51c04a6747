//! Horde Shooter - a top-down arcade shooter simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, spawning, collisions, game over)
//! - `tuning`: Data-driven game balance
//!
//! Rendering, input polling and UI live outside this crate; they drive
//! [`sim::World`] through its input struct and read it back as snapshots.

pub mod sim;
pub mod tuning;

pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Fixed host timestep in milliseconds (60 Hz)
    pub const SIM_DT_MS: f32 = 1000.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Play area dimensions
    pub const PLAY_WIDTH: f32 = 800.0;
    pub const PLAY_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_SPEED: f32 = 200.0;
    pub const PLAYER_BULLET_SPEED: f32 = 400.0;
    pub const PLAYER_RADIUS: f32 = 15.0;

    /// Enemy defaults
    pub const ENEMY_SPEED: f32 = 100.0;
    pub const ENEMY_BULLET_SPEED: f32 = 200.0;
    pub const ENEMY_RADIUS: f32 = 15.0;
    pub const ENEMY_SHOOT_INTERVAL_MS: f32 = 2000.0;

    /// Projectile defaults
    pub const PROJECTILE_RADIUS: f32 = 5.0;
    pub const PROJECTILE_LIFETIME_MS: f32 = 2000.0;

    /// Spawn cadence and difficulty ramp
    pub const SPAWN_INTERVAL_MS: f32 = 3000.0;
    pub const MIN_SPAWN_INTERVAL_MS: f32 = 500.0;
    pub const SPAWN_INTERVAL_STEP_MS: f32 = 100.0;
    pub const DIFFICULTY_PERIOD_MS: f32 = 10_000.0;
}

/// Angle (radians) of the ray from `from` to `to`.
///
/// Coincident points yield 0.0 (pointing along +x) rather than NaN.
#[inline]
pub fn angle_between(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}

/// Velocity vector of magnitude `speed` along `angle`
#[inline]
pub fn velocity_from_angle(angle: f32, speed: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin()) * speed
}

/// Convert a duration in milliseconds to seconds
#[inline]
pub fn ms_to_secs(ms: f32) -> f32 {
    ms / 1000.0
}
