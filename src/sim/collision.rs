//! Axis-aligned bounding box collision
//!
//! Every entity is a box anchored at its top-left corner, so a single
//! AABB overlap test covers bullets, enemies, and the player.

use glam::Vec2;
use serde::Serialize;

/// An axis-aligned box: top-left corner plus extent
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Aabb {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.pos
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Strict overlap on both axes. Boxes that only share an edge do not collide.
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min().x < other.max().x
            && self.max().x > other.min().x
            && self.min().y < other.max().y
            && self.max().y > other.min().y
    }
}

/// Anything that occupies a box on the playfield
pub trait Bounded {
    fn bounds(&self) -> Aabb;
}

/// Pairwise collision test between two bounded entities
#[inline]
pub fn is_colliding(a: &impl Bounded, b: &impl Bounded) -> bool {
    a.bounds().intersects(&b.bounds())
}
