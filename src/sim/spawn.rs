//! Enemy spawning and wave escalation
//!
//! Enemies arrive on a fixed interval from just beyond a random screen edge.
//! Every wave the interval shrinks until it reaches its floor.

use glam::Vec2;
use rand::Rng;
use serde::Serialize;

use super::enemy::{Enemy, EnemyKind};
use crate::consts::*;

/// What happened during one spawner tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpawnTick {
    /// An enemy should be spawned this frame
    pub spawn: bool,
    /// The wave counter advanced this frame
    pub wave_advanced: bool,
}

/// Spawn timing and difficulty state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Spawner {
    pub spawn_timer: u32,
    /// Frames between spawns; only ever decreases
    pub spawn_interval: u32,
    /// Current wave, starting at 1
    pub wave: u32,
    pub wave_timer: u32,
}

impl Default for Spawner {
    fn default() -> Self {
        Self {
            spawn_timer: 0,
            spawn_interval: INITIAL_SPAWN_INTERVAL,
            wave: 1,
            wave_timer: 0,
        }
    }
}

impl Spawner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance both timers by one frame. `alive` is the current enemy count.
    pub fn tick(&mut self, alive: usize) -> SpawnTick {
        let mut result = SpawnTick::default();

        self.spawn_timer += 1;
        if self.spawn_timer >= self.spawn_interval {
            self.spawn_timer = 0;
            result.spawn = alive < MAX_ALIVE_ENEMIES;
        }

        self.wave_timer += 1;
        if self.wave_timer >= WAVE_DURATION {
            self.wave_timer = 0;
            self.wave += 1;
            self.spawn_interval = self
                .spawn_interval
                .saturating_sub(SPAWN_INTERVAL_STEP)
                .max(MIN_SPAWN_INTERVAL);
            result.wave_advanced = true;
        }

        result
    }
}

/// Screen edge an enemy enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];
}

/// Random point just outside a random screen edge
pub fn spawn_position(rng: &mut impl Rng, width: f32, height: f32) -> Vec2 {
    let edge = Edge::ALL[rng.random_range(0..Edge::ALL.len())];
    let along: f32 = rng.random();
    match edge {
        Edge::Top => Vec2::new(along * width, -OFFSCREEN_MARGIN),
        Edge::Right => Vec2::new(width + OFFSCREEN_MARGIN, along * height),
        Edge::Bottom => Vec2::new(along * width, height + OFFSCREEN_MARGIN),
        Edge::Left => Vec2::new(-OFFSCREEN_MARGIN, along * height),
    }
}

/// Enemy of a uniformly random kind at a random edge position
pub fn random_enemy(rng: &mut impl Rng, width: f32, height: f32) -> Enemy {
    let pos = spawn_position(rng, width, height);
    let kind = EnemyKind::ALL[rng.random_range(0..EnemyKind::ALL.len())];
    Enemy::new(kind, pos)
}
