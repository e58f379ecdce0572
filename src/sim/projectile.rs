//! Straight-line projectiles fired by the player and by enemies

use glam::Vec2;
use serde::Serialize;

use super::collision::{Aabb, Bounded};
use crate::consts::{OFFSCREEN_MARGIN, PROJECTILE_SIZE};

/// Who fired a projectile; decides what it can hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Owner {
    Player,
    Enemy,
}

#[derive(Debug, Clone, Serialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub damage: i32,
    pub owner: Owner,
}

impl Projectile {
    pub fn new(pos: Vec2, vel: Vec2, damage: i32, owner: Owner) -> Self {
        Self {
            pos,
            vel,
            size: Vec2::splat(PROJECTILE_SIZE),
            damage,
            owner,
        }
    }

    pub fn update(&mut self) {
        self.pos += self.vel;
    }

    /// True once the projectile has left the playfield plus its margin
    pub fn is_off_screen(&self, width: f32, height: f32) -> bool {
        self.pos.x < -OFFSCREEN_MARGIN
            || self.pos.x > width + OFFSCREEN_MARGIN
            || self.pos.y < -OFFSCREEN_MARGIN
            || self.pos.y > height + OFFSCREEN_MARGIN
    }
}

impl Bounded for Projectile {
    fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}
