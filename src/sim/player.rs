//! The player-controlled cow

use glam::Vec2;
use serde::Serialize;

use super::collision::{Aabb, Bounded};
use super::projectile::{Owner, Projectile};
use super::weapon::{Weapon, WeaponKind};
use crate::angle_to_vec;
use crate::consts::*;

#[derive(Debug, Clone, Serialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub health: i32,
    pub max_health: i32,
    pub speed: f32,
    /// Frames of damage immunity remaining
    pub invulnerable: u32,
    pub weapons: Vec<Weapon>,
    pub current_weapon: usize,
    pub shoot_cooldown: u32,
    /// Frames until the current reload finishes
    pub reloading: u32,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            size: Vec2::splat(PLAYER_SIZE),
            health: PLAYER_MAX_HEALTH,
            max_health: PLAYER_MAX_HEALTH,
            speed: PLAYER_SPEED,
            invulnerable: 0,
            weapons: WeaponKind::ALL.into_iter().map(Weapon::new).collect(),
            current_weapon: 0,
            shoot_cooldown: 0,
            reloading: 0,
        }
    }

    /// Move by a normalized direction (each axis in {-1, 0, 1}).
    /// Diagonals are scaled so they are no faster than straight moves.
    /// Bounds are enforced later by `update`.
    pub fn move_by(&mut self, dx: f32, dy: f32) {
        let mut dir = Vec2::new(unit_axis(dx), unit_axis(dy));
        if dir.x != 0.0 && dir.y != 0.0 {
            dir *= std::f32::consts::FRAC_1_SQRT_2;
        }
        self.pos += dir * self.speed;
    }

    /// Clamp to the screen margins and count down timers
    pub fn update(&mut self, screen_width: f32, screen_height: f32) {
        self.clamp_to(screen_width, screen_height);

        self.shoot_cooldown = self.shoot_cooldown.saturating_sub(1);
        self.invulnerable = self.invulnerable.saturating_sub(1);
        self.reloading = self.reloading.saturating_sub(1);
    }

    /// Keep the player inside the screen, `PLAYER_EDGE_MARGIN` from each edge
    pub fn clamp_to(&mut self, screen_width: f32, screen_height: f32) {
        let min = Vec2::splat(PLAYER_EDGE_MARGIN);
        let max = Vec2::new(screen_width, screen_height) - self.size - PLAYER_EDGE_MARGIN;
        // Lower bound last so it wins on a screen smaller than the player
        self.pos = self.pos.min(max).max(min);
    }

    pub fn current_weapon(&self) -> &Weapon {
        &self.weapons[self.current_weapon]
    }

    fn current_weapon_mut(&mut self) -> &mut Weapon {
        &mut self.weapons[self.current_weapon]
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    pub fn is_reloading(&self) -> bool {
        self.reloading > 0
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Whether `shoot` would fire right now
    pub fn can_shoot(&self) -> bool {
        self.shoot_cooldown == 0 && !self.current_weapon().is_empty() && !self.is_reloading()
    }

    /// Fire the current weapon toward `angle` (radians).
    /// Returns `None` without touching any state if the weapon is not ready.
    pub fn shoot(&mut self, angle: f32) -> Option<Projectile> {
        if !self.can_shoot() {
            return None;
        }
        let center = self.center();
        let weapon = self.current_weapon_mut();
        let stats = weapon.stats();
        weapon.ammo -= 1;
        self.shoot_cooldown = stats.fire_rate;

        Some(Projectile::new(
            center,
            angle_to_vec(angle) * PLAYER_BULLET_SPEED,
            stats.damage,
            Owner::Player,
        ))
    }

    /// Start a reload. Ammo refills immediately; the countdown only gates shooting.
    pub fn reload(&mut self) {
        if self.is_reloading() || self.current_weapon().is_full() {
            return;
        }
        let weapon = self.current_weapon_mut();
        let reload_time = weapon.stats().reload_time;
        weapon.refill();
        self.reloading = reload_time;
    }

    /// Select a weapon by loadout index; out-of-range indices are ignored
    pub fn switch_weapon(&mut self, index: usize) {
        if index < self.weapons.len() {
            self.current_weapon = index;
        }
    }

    /// Apply damage unless still invulnerable from a previous hit
    pub fn take_damage(&mut self, amount: i32) {
        if self.invulnerable > 0 {
            return;
        }
        self.health = (self.health - amount).clamp(0, self.max_health);
        self.invulnerable = PLAYER_INVULNERABLE_FRAMES;
    }

    /// Renderer blink while invulnerable: hidden on alternating 5-frame slices
    pub fn is_flashing(&self) -> bool {
        self.invulnerable > 0 && (self.invulnerable / 5) % 2 == 1
    }

    pub fn health_fraction(&self) -> f32 {
        (self.health.max(0) as f32 / self.max_health as f32).clamp(0.0, 1.0)
    }
}

impl Bounded for Player {
    fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// Collapse an axis input to -1, 0 or 1 (NaN counts as 0)
#[inline]
fn unit_axis(v: f32) -> f32 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}
