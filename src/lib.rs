//! Pixel Cow - a top-down pixel arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, spawning, game state)
//! - `snapshot`: Read-only views handed to the renderer and HUD
//! - `platform`: Browser/native input abstraction
//! - `runner`: Frame driver tying input, simulation, and audio together
//! - `settings`: Player preferences

pub mod audio;
pub mod platform;
pub mod runner;
pub mod settings;
pub mod sim;
pub mod snapshot;

pub use runner::GameRunner;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions (pixels)
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    // Cooldowns and timers below are in frames (nominal 60 per second)

    /// Player keeps this far from the screen edge
    pub const PLAYER_EDGE_MARGIN: f32 = 8.0;
    pub const PLAYER_SIZE: f32 = 32.0;
    pub const PLAYER_MAX_HEALTH: i32 = 100;
    pub const PLAYER_SPEED: f32 = 3.0;
    /// Invulnerability window after taking damage (1 second)
    pub const PLAYER_INVULNERABLE_FRAMES: u32 = 60;
    pub const PLAYER_BULLET_SPEED: f32 = 8.0;

    pub const ENEMY_SHOOT_COOLDOWN: u32 = 120;
    pub const ENEMY_SHOOT_RANGE: f32 = 200.0;
    pub const ENEMY_BULLET_SPEED: f32 = 4.0;
    pub const ENEMY_BULLET_DAMAGE: i32 = 15;
    /// Flat damage from touching an enemy
    pub const CONTACT_DAMAGE: i32 = 10;
    /// Distance the player is shoved away from an enemy on contact
    pub const CONTACT_KNOCKBACK: f32 = 20.0;

    pub const PROJECTILE_SIZE: f32 = 4.0;
    /// Off-screen slack before projectiles are culled; also the spawn ring offset
    pub const OFFSCREEN_MARGIN: f32 = 50.0;

    /// Per-tick velocity damping for particles
    pub const PARTICLE_DAMPING: f32 = 0.95;

    pub const INITIAL_ENEMIES: usize = 3;
    pub const MAX_ALIVE_ENEMIES: usize = 8;
    pub const INITIAL_SPAWN_INTERVAL: u32 = 180;
    pub const MIN_SPAWN_INTERVAL: u32 = 60;
    pub const SPAWN_INTERVAL_STEP: u32 = 20;
    /// Frames per wave (30 seconds)
    pub const WAVE_DURATION: u32 = 1800;
}

/// Unit direction from `from` toward `to`, or zero when they coincide
#[inline]
pub fn direction_to(from: Vec2, to: Vec2) -> Vec2 {
    (to - from).normalize_or_zero()
}

/// Angle (radians) of the vector from `from` to `to`, screen space (+y down)
#[inline]
pub fn aim_angle(from: Vec2, to: Vec2) -> f32 {
    (to.y - from.y).atan2(to.x - from.x)
}

/// Unit vector for an angle in radians
#[inline]
pub fn angle_to_vec(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}
