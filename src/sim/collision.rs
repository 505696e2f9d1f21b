//! Axis-aligned collision tests
//!
//! Every entity is a square, so hits reduce to rectangle overlap. Projectiles
//! only ever threaten the side they are flying toward, which is how a shot
//! avoids hitting its own shooter without tracking an owner.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Direction, Projectile};
use crate::consts::*;

/// Axis-aligned rectangle (top-left corner plus extent)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Square with its top-left corner at `pos`
    pub fn square(pos: Vec2, size: f32) -> Self {
        Self::new(pos.x, pos.y, size, size)
    }

    /// Player hitbox at vertical position `y`
    pub fn player(y: f32) -> Self {
        Self::square(Vec2::new(PLAYER_X, y), PLAYER_SIZE)
    }

    /// Boss hitbox at vertical position `y`
    pub fn boss(y: f32) -> Self {
        Self::square(Vec2::new(BOSS_X, y), BOSS_SIZE)
    }

    pub fn projectile(projectile: &Projectile) -> Self {
        Self::square(projectile.pos, PROJECTILE_SIZE)
    }
}

/// True if the rectangles share a region of nonzero area
///
/// Edges are half-open: rectangles that merely touch do not overlap.
#[inline]
pub fn overlaps(a: Rect, b: Rect) -> bool {
    a.x < b.x + b.width && a.x + a.width > b.x && a.y < b.y + b.height && a.y + a.height > b.y
}

/// Does a boss shot hit the player standing at `player_y`?
pub fn player_is_hit(projectile: &Projectile, player_y: f32) -> bool {
    if projectile.direction != Direction::Left {
        return false;
    }
    overlaps(Rect::player(player_y), Rect::projectile(projectile))
}

/// Does a player shot hit the boss hovering at `boss_y`?
pub fn boss_is_hit(projectile: &Projectile, boss_y: f32) -> bool {
    if projectile.direction != Direction::Right {
        return false;
    }
    overlaps(Rect::boss(boss_y), Rect::projectile(projectile))
}
