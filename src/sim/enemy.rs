//! Enemies
//!
//! Basic, Fast, and Tank enemies share one behavior; they differ only in the
//! constants from `EnemyKind::stats`.

use glam::Vec2;
use serde::Serialize;

use super::collision::{Aabb, Bounded};
use super::player::Player;
use super::projectile::{Owner, Projectile};
use crate::consts::*;
use crate::{aim_angle, angle_to_vec, direction_to};

/// Enemy variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum EnemyKind {
    #[default]
    Basic,
    Fast,
    Tank,
}

/// Constant stats for an enemy kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyStats {
    pub speed: f32,
    pub health: i32,
    pub points: u32,
    /// Square box edge length
    pub size: f32,
    /// 0xRRGGBB
    pub color: u32,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 3] = [EnemyKind::Basic, EnemyKind::Fast, EnemyKind::Tank];

    pub fn stats(self) -> EnemyStats {
        match self {
            EnemyKind::Basic => EnemyStats {
                speed: 1.5,
                health: 50,
                points: 10,
                size: 24.0,
                color: 0xff4444,
            },
            EnemyKind::Fast => EnemyStats {
                speed: 2.5,
                health: 30,
                points: 15,
                size: 20.0,
                color: 0x44ff44,
            },
            EnemyKind::Tank => EnemyStats {
                speed: 0.8,
                health: 100,
                points: 25,
                size: 32.0,
                color: 0x4444ff,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Enemy {
    pub kind: EnemyKind,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub health: i32,
    pub max_health: i32,
    pub speed: f32,
    /// Score awarded on death
    pub points: u32,
    pub shoot_cooldown: u32,
}

impl Enemy {
    pub fn new(kind: EnemyKind, pos: Vec2) -> Self {
        let stats = kind.stats();
        Self {
            kind,
            pos,
            size: Vec2::splat(stats.size),
            health: stats.health,
            max_health: stats.health,
            speed: stats.speed,
            points: stats.points,
            shoot_cooldown: 0,
        }
    }

    /// Walk straight at the player and count down the shot timer
    pub fn update(&mut self, player: &Player) {
        self.pos += direction_to(self.pos, player.pos) * self.speed;
        self.shoot_cooldown = self.shoot_cooldown.saturating_sub(1);
    }

    /// Fire at the player when reloaded and within range
    pub fn shoot(&mut self, player: &Player) -> Option<Projectile> {
        if self.shoot_cooldown > 0 || self.pos.distance(player.pos) >= ENEMY_SHOOT_RANGE {
            return None;
        }
        self.shoot_cooldown = ENEMY_SHOOT_COOLDOWN;
        let angle = aim_angle(self.pos, player.pos);
        Some(Projectile::new(
            self.center(),
            angle_to_vec(angle) * ENEMY_BULLET_SPEED,
            ENEMY_BULLET_DAMAGE,
            Owner::Enemy,
        ))
    }

    /// Enemies have no invulnerability window
    pub fn take_damage(&mut self, amount: i32) {
        self.health -= amount;
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Remaining health for the overhead bar
    pub fn health_fraction(&self) -> f32 {
        (self.health as f32 / self.max_health as f32).clamp(0.0, 1.0)
    }

    pub fn color(&self) -> u32 {
        self.kind.stats().color
    }
}

impl Bounded for Enemy {
    fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}
