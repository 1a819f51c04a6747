//! Horde Shooter headless runner
//!
//! Drives the simulation with a fixed-timestep loop and a simple autopilot,
//! logging game events as they happen.
//!
//! Usage: `horde-shooter [tuning.json] [seed]`

#[cfg(not(target_arch = "wasm32"))]
mod harness {
    use glam::Vec2;

    use horde_shooter::Tuning;
    use horde_shooter::consts::{MAX_SUBSTEPS, SIM_DT_MS};
    use horde_shooter::sim::{GameEvent, TickInput, World};

    const DEFAULT_SEED: u64 = 0x5eed;
    /// Host frame length (not a multiple of the sim step)
    const FRAME_MS: f32 = 1000.0 / 45.0;
    /// Give up after this much game time
    const MAX_GAME_MS: f32 = 180_000.0;
    const FIRE_COOLDOWN_MS: f32 = 250.0;
    const STRAFE_PERIOD_MS: f32 = 1500.0;

    /// Strafes back and forth and shoots at the nearest enemy
    struct Autopilot {
        fire_cooldown_ms: f32,
        strafe_ms: f32,
        strafe_right: bool,
    }

    impl Autopilot {
        fn new() -> Self {
            Self {
                fire_cooldown_ms: 0.0,
                strafe_ms: 0.0,
                strafe_right: true,
            }
        }

        fn input(&mut self, world: &World, dt_ms: f32) -> TickInput {
            self.strafe_ms += dt_ms;
            if self.strafe_ms >= STRAFE_PERIOD_MS {
                self.strafe_ms = 0.0;
                self.strafe_right = !self.strafe_right;
            }

            // Keep away from the nearest threat vertically
            let player = world.player().pos;
            let nearest = nearest_enemy(world, player);
            let (up, down) = match nearest {
                Some(enemy) if (enemy - player).length() < 150.0 => {
                    (enemy.y > player.y, enemy.y <= player.y)
                }
                _ => (false, false),
            };

            TickInput {
                left: !self.strafe_right,
                right: self.strafe_right,
                up,
                down,
            }
        }

        fn aim(&mut self, world: &World, dt_ms: f32) -> Option<Vec2> {
            self.fire_cooldown_ms -= dt_ms;
            if self.fire_cooldown_ms > 0.0 {
                return None;
            }
            let target = nearest_enemy(world, world.player().pos)?;
            self.fire_cooldown_ms = FIRE_COOLDOWN_MS;
            Some(target)
        }
    }

    fn nearest_enemy(world: &World, from: Vec2) -> Option<Vec2> {
        world
            .enemies()
            .map(|e| e.pos)
            .min_by(|a, b| a.distance_squared(from).total_cmp(&b.distance_squared(from)))
    }

    fn log_events(world: &mut World, kills: &mut u32) {
        for event in world.drain_events() {
            match event {
                GameEvent::EnemySpawned { id, pos } => {
                    log::info!("Enemy {} entered at ({:.0}, {:.0})", id, pos.x, pos.y);
                }
                GameEvent::EnemyDestroyed { id } => {
                    *kills += 1;
                    log::info!("Enemy {} down ({} total)", id, kills);
                }
                GameEvent::GameOver => log::warn!("Player hit, game over"),
            }
        }
    }

    pub fn run() {
        let mut args = std::env::args().skip(1);
        let tuning = match args.next() {
            Some(path) => Tuning::load(&path),
            None => Tuning::default(),
        };
        let seed = match args.next() {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                log::warn!("Invalid seed {:?}, using {}", raw, DEFAULT_SEED);
                DEFAULT_SEED
            }),
            None => DEFAULT_SEED,
        };

        let mut world = World::new(tuning, seed);
        let mut pilot = Autopilot::new();
        let mut accumulator = 0.0;
        let mut kills = 0;

        while !world.is_game_over() && world.elapsed_ms() < MAX_GAME_MS {
            accumulator += FRAME_MS;

            let mut substeps = 0;
            while accumulator >= SIM_DT_MS && substeps < MAX_SUBSTEPS {
                let input = pilot.input(&world, SIM_DT_MS);
                if let Some(target) = pilot.aim(&world, SIM_DT_MS) {
                    world.fire_player_weapon(target);
                }
                world.advance(SIM_DT_MS, &input);
                accumulator -= SIM_DT_MS;
                substeps += 1;
            }
            log_events(&mut world, &mut kills);
        }

        log::info!(
            "Finished after {:.1}s with {} kills, spawn interval {} ms",
            horde_shooter::ms_to_secs(world.elapsed_ms()),
            kills,
            world.spawn_interval_ms()
        );

        match world.snapshot().to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("Failed to serialize snapshot: {}", e),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Horde Shooter (headless) starting...");
    harness::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No host loop on wasm; embed the library instead
}
