//! Per-frame simulation step
//!
//! Core game loop that advances the session by an elapsed-time delta.
//! Every timer (spawn cadence, difficulty ramp, enemy shooting, projectile
//! expiry) is a countdown or accumulator evaluated synchronously here.

use glam::Vec2;

use super::collision::CollisionChecker;
use super::player::MoveInput;
use super::projectile::tick_and_prune;
use super::state::{
    EntityId, GameEvent, GamePhase, PlayArea, Session, World, alloc_id, resolve_target,
};
use crate::tuning::Tuning;

/// Input for a single tick
pub type TickInput = MoveInput;

impl<C: CollisionChecker> World<C> {
    /// Advance the session by `dt_ms` milliseconds of game time
    ///
    /// Does nothing once the session is over.
    pub fn advance(&mut self, dt_ms: f32, input: &TickInput) {
        if self.session.phase == GamePhase::GameOver {
            return;
        }
        let dt_ms = sanitize_dt(dt_ms);
        let session = &mut self.session;
        session.elapsed_ms += dt_ms;

        session.player.apply_input(input);
        session.player.tick(dt_ms, &self.area);

        update_enemies(session, &self.area, dt_ms);

        if resolve_player_hits(session, &self.checker) {
            enter_game_over(session);
            return;
        }
        resolve_enemy_hits(session, &self.checker);

        update_spawning(session, &self.tuning, &self.area, dt_ms);
        update_difficulty(session, &self.tuning, dt_ms);
    }

    /// Fire the player's weapon toward a pointer position
    ///
    /// Returns the new projectile's id, or `None` after game over.
    pub fn fire_player_weapon(&mut self, target: Vec2) -> Option<EntityId> {
        if self.is_game_over() {
            return None;
        }
        let id = self.session.next_entity_id();
        self.session.player.shoot(target, id);
        Some(id)
    }
}

fn sanitize_dt(dt_ms: f32) -> f32 {
    if dt_ms.is_finite() && dt_ms >= 0.0 {
        dt_ms
    } else {
        log::debug!("Ignoring invalid tick delta {}", dt_ms);
        0.0
    }
}

/// Drop destroyed enemies, then move and shoot with the rest
fn update_enemies(session: &mut Session, area: &PlayArea, dt_ms: f32) {
    let (live, dead): (Vec<_>, Vec<_>) = std::mem::take(&mut session.enemies)
        .into_iter()
        .partition(|e| e.active);
    session.enemies = live;
    for mut enemy in dead {
        session.stray_projectiles.extend(enemy.release_projectiles());
    }

    tick_and_prune(&mut session.stray_projectiles, dt_ms);

    let (player, enemies, next_id) = session.enemy_tick_parts();
    let mut alloc = || alloc_id(next_id);
    for enemy in enemies.iter_mut() {
        let target = resolve_target(player, enemy.target());
        enemy.tick(dt_ms, target, area, &mut alloc);
    }
}

/// Hostile projectiles vs the player. Returns true on a hit.
fn resolve_player_hits<C: CollisionChecker>(session: &mut Session, checker: &C) -> bool {
    let player_region = session.player.hit_region();
    let hostile = session
        .enemies
        .iter_mut()
        .filter(|e| e.active)
        .flat_map(|e| e.projectiles.iter_mut())
        .chain(session.stray_projectiles.iter_mut());

    for shot in hostile {
        if shot.active && checker.overlaps(&player_region, &shot.hit_region()) {
            shot.destroy();
            return true;
        }
    }
    false
}

/// Player projectiles vs enemies
///
/// Each projectile takes out at most one enemy, and an enemy is gone after
/// its first hit, so a second shot on the same enemy flies on. A killed
/// enemy's shots become strays immediately.
fn resolve_enemy_hits<C: CollisionChecker>(session: &mut Session, checker: &C) {
    let Session {
        player,
        enemies,
        stray_projectiles,
        events,
        ..
    } = session;

    for shot in player.projectiles.iter_mut().filter(|p| p.active) {
        let shot_region = shot.hit_region();
        let hit = enemies
            .iter_mut()
            .filter(|e| e.active)
            .find(|e| checker.overlaps(&shot_region, &e.hit_region()));

        if let Some(enemy) = hit {
            shot.destroy();
            if enemy.mark_destroyed() {
                stray_projectiles.extend(enemy.release_projectiles());
                events.push(GameEvent::EnemyDestroyed { id: enemy.id });
                log::debug!("Enemy {} destroyed by projectile {}", enemy.id, shot.id);
            }
        }
    }
    player.projectiles.retain(|p| p.active);
}

/// Playing → GameOver, with the end-of-game cleanup
///
/// Every enemy is removed along with all hostile fire. Player projectiles
/// are left frozen where they are.
fn enter_game_over(session: &mut Session) {
    if session.phase == GamePhase::GameOver {
        return;
    }
    session.phase = GamePhase::GameOver;

    for enemy in session.enemies.iter_mut() {
        enemy.mark_destroyed();
    }
    session.enemies.clear();
    session.stray_projectiles.clear();
    session.events.push(GameEvent::GameOver);

    log::info!(
        "Game over after {:.1}s (seed {})",
        crate::ms_to_secs(session.elapsed_ms),
        session.seed
    );
}

fn update_spawning(session: &mut Session, tuning: &Tuning, area: &PlayArea, dt_ms: f32) {
    session.spawn_accum_ms += dt_ms;
    if session.spawn_accum_ms >= session.spawn_interval_ms {
        session.spawn_accum_ms = 0.0;
        let pos = area.random_edge_point(&mut session.rng);
        session.spawn_enemy(pos, tuning);
    }
}

/// Shrink the spawn interval once per difficulty period, down to the floor
fn update_difficulty(session: &mut Session, tuning: &Tuning, dt_ms: f32) {
    session.difficulty_accum_ms += dt_ms;
    while session.difficulty_accum_ms >= tuning.difficulty_period_ms {
        session.difficulty_accum_ms -= tuning.difficulty_period_ms;
        let next = (session.spawn_interval_ms - tuning.spawn_interval_step_ms)
            .max(tuning.min_spawn_interval_ms);
        if next < session.spawn_interval_ms {
            log::debug!(
                "Spawn interval {} -> {} ms",
                session.spawn_interval_ms,
                next
            );
            session.spawn_interval_ms = next;
        }
    }
}
