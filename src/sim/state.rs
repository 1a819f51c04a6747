//! Game state and core simulation types
//!
//! A [`World`] owns the balance tuning, the collision checker and the
//! current [`Session`]. Everything that belongs to one play-through lives
//! in the session, so a restart is simply a fresh session.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{CollisionChecker, GeometricOverlap};
use super::enemy::Enemy;
use super::player::Player;
use super::projectile::Projectile;
use super::snapshot::WorldSnapshot;
use crate::tuning::Tuning;

/// Per-session entity identifier (allocated in creation order)
pub type EntityId = u32;

/// Anything positioned and independently updatable
pub trait Entity {
    fn id(&self) -> EntityId;
    fn pos(&self) -> Vec2;
    fn is_active(&self) -> bool;
}

/// Active entities of a slice, in order
pub fn live<E: Entity>(items: &[E]) -> impl Iterator<Item = &E> {
    items.iter().filter(|e| e.is_active())
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Player was hit; terminal until restart
    GameOver,
}

/// Notifications for the presentation layer, drained once per frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    EnemySpawned { id: EntityId, pos: Vec2 },
    EnemyDestroyed { id: EntityId },
    /// Raised exactly once per session
    GameOver,
}

/// One of the four play-area edges enemies spawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnEdge {
    Top,
    Right,
    Bottom,
    Left,
}

impl SpawnEdge {
    pub const ALL: [SpawnEdge; 4] = [
        SpawnEdge::Top,
        SpawnEdge::Right,
        SpawnEdge::Bottom,
        SpawnEdge::Left,
    ];
}

/// Rectangular play area anchored at the origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayArea {
    pub width: f32,
    pub height: f32,
}

impl PlayArea {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Clamp a body of `radius` so it stays fully inside the area
    pub fn clamp_inset(&self, pos: Vec2, radius: f32) -> Vec2 {
        let rx = radius.min(self.width / 2.0);
        let ry = radius.min(self.height / 2.0);
        Vec2::new(
            pos.x.clamp(rx, self.width - rx),
            pos.y.clamp(ry, self.height - ry),
        )
    }

    /// Point on `edge`, `along` in 0..=1 measured from the top/left corner
    pub fn edge_point(&self, edge: SpawnEdge, along: f32) -> Vec2 {
        let along = along.clamp(0.0, 1.0);
        match edge {
            SpawnEdge::Top => Vec2::new(along * self.width, 0.0),
            SpawnEdge::Right => Vec2::new(self.width, along * self.height),
            SpawnEdge::Bottom => Vec2::new(along * self.width, self.height),
            SpawnEdge::Left => Vec2::new(0.0, along * self.height),
        }
    }

    /// Uniformly random edge, uniformly random point along it
    pub fn random_edge_point<R: Rng>(&self, rng: &mut R) -> Vec2 {
        let edge = SpawnEdge::ALL[rng.random_range(0..SpawnEdge::ALL.len())];
        let along = rng.random_range(0.0..=1.0f32);
        self.edge_point(edge, along)
    }
}

/// Everything belonging to a single play-through
#[derive(Debug, Clone)]
pub struct Session {
    /// Seed this session's RNG was created from
    pub seed: u64,
    pub phase: GamePhase,
    /// Game time elapsed while playing (ms)
    pub elapsed_ms: f32,
    /// Current delay between spawns (ms, non-increasing)
    pub spawn_interval_ms: f32,
    /// Time since the last spawn (ms)
    pub spawn_accum_ms: f32,
    /// Time since the last difficulty step (ms)
    pub difficulty_accum_ms: f32,
    pub player: Player,
    /// Live enemies in spawn order
    pub enemies: Vec<Enemy>,
    /// Enemy shots still in flight after their shooter was destroyed
    pub stray_projectiles: Vec<Projectile>,
    pub(super) rng: Pcg32,
    pub(super) events: Vec<GameEvent>,
    next_id: EntityId,
}

impl Session {
    /// Create a fresh session with the player at the centre of the area
    pub fn new(tuning: &Tuning, seed: u64) -> Self {
        let mut next_id = 1;
        let player = Player::new(alloc_id(&mut next_id), tuning.center(), tuning);
        Self {
            seed,
            phase: GamePhase::Playing,
            elapsed_ms: 0.0,
            spawn_interval_ms: tuning.spawn_interval_ms,
            spawn_accum_ms: 0.0,
            difficulty_accum_ms: 0.0,
            player,
            enemies: Vec::new(),
            stray_projectiles: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            next_id,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        alloc_id(&mut self.next_id)
    }

    /// Split borrow used while ticking enemies: the id counter alongside
    /// the player (read) and enemy list (write)
    pub(super) fn enemy_tick_parts(&mut self) -> (&Player, &mut Vec<Enemy>, &mut EntityId) {
        (&self.player, &mut self.enemies, &mut self.next_id)
    }

    /// Add an enemy chasing the player
    pub fn spawn_enemy(&mut self, pos: Vec2, tuning: &Tuning) -> EntityId {
        let id = self.next_entity_id();
        self.enemies.push(Enemy::new(id, pos, self.player.id, tuning));
        self.events.push(GameEvent::EnemySpawned { id, pos });
        log::debug!("Enemy {} spawned at ({:.0}, {:.0})", id, pos.x, pos.y);
        id
    }

    /// Position of `target` if it is still a live entity
    pub fn resolve_target(&self, target: EntityId) -> Option<Vec2> {
        resolve_target(&self.player, target)
    }

    /// Active enemy with the given id
    pub fn enemy(&self, id: EntityId) -> Option<&Enemy> {
        live(&self.enemies).find(|e| e.id == id)
    }

    /// Enemy-owned and stray projectiles that are still live
    pub fn hostile_projectiles(&self) -> impl Iterator<Item = &Projectile> {
        live(&self.enemies)
            .flat_map(|e| live(&e.projectiles))
            .chain(live(&self.stray_projectiles))
    }
}

pub(super) fn alloc_id(next_id: &mut EntityId) -> EntityId {
    let id = *next_id;
    *next_id = next_id.wrapping_add(1);
    id
}

pub(super) fn resolve_target(player: &Player, target: EntityId) -> Option<Vec2> {
    (player.id == target && player.active).then_some(player.pos)
}

/// The simulation: tuning, collision capability and the current session
#[derive(Debug, Clone)]
pub struct World<C = GeometricOverlap> {
    pub(super) tuning: Tuning,
    pub(super) area: PlayArea,
    pub(super) checker: C,
    pub session: Session,
}

impl World<GeometricOverlap> {
    /// Create a world using the built-in circle/AABB overlap tests
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        Self::with_checker(tuning, seed, GeometricOverlap)
    }
}

impl<C: CollisionChecker> World<C> {
    /// Create a world with a custom collision checker
    pub fn with_checker(tuning: Tuning, seed: u64, checker: C) -> Self {
        let tuning = tuning.sanitized();
        let area = PlayArea::new(tuning.width, tuning.height);
        let session = Session::new(&tuning, seed);
        log::info!(
            "New session (seed {}) on {}x{} play area",
            seed,
            tuning.width,
            tuning.height
        );
        Self {
            tuning,
            area,
            checker,
            session,
        }
    }

    /// Throw away the current session and start a new one
    ///
    /// All enemies (and with them their shoot cooldowns), every projectile
    /// in flight and any undrained events are discarded. The new seed is
    /// drawn from the old session's RNG.
    pub fn restart(&mut self) {
        let seed = self.session.rng.random::<u64>();
        self.restart_with_seed(seed);
    }

    /// Restart with an explicit seed
    pub fn restart_with_seed(&mut self, seed: u64) {
        self.session = Session::new(&self.tuning, seed);
        log::info!("Session restarted (seed {})", seed);
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn area(&self) -> &PlayArea {
        &self.area
    }

    pub fn phase(&self) -> GamePhase {
        self.session.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.session.phase == GamePhase::GameOver
    }

    pub fn player(&self) -> &Player {
        &self.session.player
    }

    /// Live (active) enemies in spawn order
    pub fn enemies(&self) -> impl Iterator<Item = &Enemy> {
        live(&self.session.enemies)
    }

    pub fn spawn_interval_ms(&self) -> f32 {
        self.session.spawn_interval_ms
    }

    pub fn elapsed_ms(&self) -> f32 {
        self.session.elapsed_ms
    }

    /// Read-only view for the presentation layer
    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot::capture(&self.session)
    }

    /// Take all events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.session.events)
    }

    /// Place an enemy at an exact position (no-op after game over)
    pub fn spawn_enemy_at(&mut self, pos: Vec2) -> Option<EntityId> {
        if self.is_game_over() {
            return None;
        }
        Some(self.session.spawn_enemy(pos, &self.tuning))
    }

    /// Put a hostile projectile into flight that no enemy owns
    /// (no-op after game over)
    pub fn inject_enemy_projectile(&mut self, pos: Vec2, vel: Vec2) -> Option<EntityId> {
        if self.is_game_over() {
            return None;
        }
        let id = self.session.next_entity_id();
        self.session.stray_projectiles.push(Projectile::new(
            id,
            pos,
            vel,
            self.tuning.projectile_radius,
            self.tuning.projectile_lifetime_ms,
        ));
        Some(id)
    }
}
