//! Game state and core simulation types
//!
//! `GameState` is the single owner of every entity collection. It is built
//! explicitly and passed to `tick`; there is no global game instance.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::enemy::Enemy;
use super::particle::Particle;
use super::player::Player;
use super::projectile::Projectile;
use super::spawn::{Spawner, random_enemy};
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum GamePhase {
    /// Active gameplay
    #[default]
    Playing,
    /// Simulation suspended by the player
    Paused,
    /// Player health reached zero; only a restart leaves this phase
    GameOver,
}

/// Discrete things that happened during a tick, drained by the host
/// for audio cues and UI transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GameEvent {
    /// Player fired a shot
    Shoot,
    /// Player projectile hit an enemy that survived
    Hit,
    /// Enemy destroyed
    EnemyDeath { points: u32 },
    /// Player was struck by a projectile or an enemy body
    PlayerHit,
    /// Difficulty increased
    WaveAdvanced { wave: u32 },
    Paused,
    Resumed,
    GameOver { score: u32 },
    Restarted,
}

/// Complete game state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub width: f32,
    pub height: f32,
    pub phase: GamePhase,
    pub score: u32,
    /// Enemies destroyed this run
    pub kills: u32,
    /// Simulated frames this run
    pub frame: u64,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    pub spawner: Spawner,
    /// Events raised since the last drain
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a new game on the default playfield
    pub fn new(seed: u64) -> Self {
        Self::with_size(seed, SCREEN_WIDTH, SCREEN_HEIGHT)
    }

    /// Create a new game on a playfield of the given size
    pub fn with_size(seed: u64, width: f32, height: f32) -> Self {
        let mut state = Self {
            seed,
            width,
            height,
            phase: GamePhase::Playing,
            score: 0,
            kills: 0,
            frame: 0,
            player: Player::new(Self::player_start(width, height)),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            particles: Vec::new(),
            spawner: Spawner::new(),
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        };
        state.spawn_initial_enemies();
        log::info!("New game (seed {seed}, {width}x{height})");
        state
    }

    fn player_start(width: f32, height: f32) -> Vec2 {
        Vec2::new(width / 2.0, height / 2.0)
    }

    /// Reset every counter and collection, then spawn the opening enemies.
    /// The RNG keeps running so consecutive runs differ.
    pub fn restart(&mut self) {
        self.phase = GamePhase::Playing;
        self.score = 0;
        self.kills = 0;
        self.frame = 0;
        self.player = Player::new(Self::player_start(self.width, self.height));
        self.enemies.clear();
        self.projectiles.clear();
        self.particles.clear();
        self.spawner = Spawner::new();
        self.events.clear();
        self.spawn_initial_enemies();
        self.events.push(GameEvent::Restarted);
        log::info!("Game restarted");
    }

    fn spawn_initial_enemies(&mut self) {
        for _ in 0..INITIAL_ENEMIES {
            self.spawn_random_enemy();
        }
    }

    /// Spawn one random enemy beyond a random screen edge
    pub fn spawn_random_enemy(&mut self) {
        let enemy = random_enemy(&mut self.rng, self.width, self.height);
        log::debug!("Spawned {:?} at ({:.0}, {:.0})", enemy.kind, enemy.pos.x, enemy.pos.y);
        self.enemies.push(enemy);
    }

    /// Current wave number (1-based)
    pub fn wave(&self) -> u32 {
        self.spawner.wave
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Flip between Playing and Paused. Has no effect once the game is over.
    pub fn toggle_pause(&mut self) {
        match self.phase {
            GamePhase::Playing => {
                self.phase = GamePhase::Paused;
                self.events.push(GameEvent::Paused);
                log::debug!("Paused at frame {}", self.frame);
            }
            GamePhase::Paused => {
                self.phase = GamePhase::Playing;
                self.events.push(GameEvent::Resumed);
                log::debug!("Resumed at frame {}", self.frame);
            }
            GamePhase::GameOver => {}
        }
    }

    /// Enter GameOver (idempotent)
    pub fn game_over(&mut self) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.events.push(GameEvent::GameOver { score: self.score });
        log::info!(
            "Game over: score {}, wave {}, {} kills",
            self.score,
            self.wave(),
            self.kills
        );
    }

    /// Take all events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
