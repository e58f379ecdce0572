//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame-stepped, one `tick` per frame
//! - Seeded RNG only
//! - No rendering, audio, or platform dependencies

pub mod collision;
pub mod enemy;
pub mod particle;
pub mod player;
pub mod projectile;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod weapon;

pub use collision::{Aabb, Bounded, is_colliding};
pub use enemy::{Enemy, EnemyKind, EnemyStats};
pub use particle::{Particle, ParticleBurst, emit_burst};
pub use player::Player;
pub use projectile::{Owner, Projectile};
pub use spawn::{SpawnTick, Spawner, random_enemy, spawn_position};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};
pub use weapon::{Weapon, WeaponKind, WeaponStats};
