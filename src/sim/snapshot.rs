//! Read-only per-frame view for the presentation layer
//!
//! Only active entities make it into a snapshot.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::projectile::Projectile;
use super::state::{Entity, EntityId, GamePhase, Session, live};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectileView {
    pub id: EntityId,
    pub pos: Vec2,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub id: EntityId,
    pub pos: Vec2,
    pub projectiles: Vec<ProjectileView>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyView {
    pub id: EntityId,
    pub pos: Vec2,
    pub projectiles: Vec<ProjectileView>,
}

/// Everything a renderer needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub phase: GamePhase,
    pub game_over: bool,
    pub elapsed_ms: f32,
    pub spawn_interval_ms: f32,
    pub player: PlayerView,
    pub enemies: Vec<EnemyView>,
    /// Shots from enemies that have since been destroyed
    pub stray_projectiles: Vec<ProjectileView>,
}

fn views(projectiles: &[Projectile]) -> Vec<ProjectileView> {
    live(projectiles)
        .map(|p| ProjectileView {
            id: p.id(),
            pos: p.pos(),
        })
        .collect()
}

impl WorldSnapshot {
    pub fn capture(session: &Session) -> Self {
        Self {
            phase: session.phase,
            game_over: session.phase == GamePhase::GameOver,
            elapsed_ms: session.elapsed_ms,
            spawn_interval_ms: session.spawn_interval_ms,
            player: PlayerView {
                id: session.player.id,
                pos: session.player.pos,
                projectiles: views(&session.player.projectiles),
            },
            enemies: live(&session.enemies)
                .map(|e| EnemyView {
                    id: e.id,
                    pos: e.pos,
                    projectiles: views(&e.projectiles),
                })
                .collect(),
            stray_projectiles: views(&session.stray_projectiles),
        }
    }

    /// Every live enemy-side projectile (owned and stray)
    pub fn hostile_projectiles(&self) -> impl Iterator<Item = &ProjectileView> {
        self.enemies
            .iter()
            .flat_map(|e| e.projectiles.iter())
            .chain(self.stray_projectiles.iter())
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
