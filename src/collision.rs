//! Bounding-box collision.
//!
//! Circles are approximated by their bounding squares. This is looser than
//! a true circle test near the corners and is what the game plays with.

use crate::entities::{Balloon, Bullet};

/// Axis-aligned box, `y` up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Aabb {
    pub left: i32,
    pub right: i32,
    pub bottom: i32,
    pub top: i32,
}

impl Aabb {
    /// Square box enclosing a circle of `radius` centred at `(x, y)`.
    pub fn around(x: i32, y: i32, radius: i32) -> Self {
        Self {
            left: x - radius,
            right: x + radius,
            bottom: y - radius,
            top: y + radius,
        }
    }

    /// Strict overlap: boxes that only share an edge do not collide.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.right > other.left
            && self.left < other.right
            && self.top > other.bottom
            && self.bottom < other.top
    }
}

impl Bullet {
    pub fn bounds(&self) -> Aabb {
        Aabb::around(self.x, self.y, self.radius)
    }
}

impl Balloon {
    pub fn bounds(&self) -> Aabb {
        Aabb::around(self.x, self.y, self.radius)
    }
}

/// Whether `bullet` has hit `balloon`.
pub fn check_hit(bullet: &Bullet, balloon: &Balloon) -> bool {
    bullet.bounds().overlaps(&balloon.bounds())
}
