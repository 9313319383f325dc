//! Collision helpers for boxes against the playfield and velocity response
//!
//! Collision response in this game is always an axis-aligned bounce, so the
//! helpers here are small: classify which playfield walls a box has crossed,
//! and flip or renormalize a direction vector.

use glam::Vec2;

use super::rect::Rect;

/// A screen axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// Surface normal whose reflection negates this axis
    pub fn normal(self) -> Vec2 {
        match self {
            Axis::Horizontal => Vec2::X,
            Axis::Vertical => Vec2::Y,
        }
    }
}

/// Direction-vector operations used by the bounce response
pub trait VelocityExt {
    /// Negate one component, leaving the other untouched
    fn negate_axis(self, axis: Axis) -> Self;
    /// Normalize to unit length; degenerate vectors take `fallback` instead
    fn unit_or(self, fallback: Self) -> Self;
}

impl VelocityExt for Vec2 {
    #[inline]
    fn negate_axis(self, axis: Axis) -> Self {
        reflect_velocity(self, axis.normal())
    }

    fn unit_or(self, fallback: Self) -> Self {
        self.try_normalize()
            .or_else(|| fallback.try_normalize())
            .unwrap_or(Vec2::NEG_Y)
    }
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Which playfield walls a box currently touches or has crossed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallContact {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    /// The box has fallen fully below the playfield
    pub below: bool,
}

/// Classify a box against the playfield
///
/// Left, right and top are crossed as soon as the box edge reaches the wall.
/// The bottom is only crossed once the top of the box has passed it, so a
/// ball is "lost" only after it has left the screen.
pub fn wall_contact(bounds: &Rect, playfield: &Rect) -> WallContact {
    WallContact {
        left: bounds.left() <= playfield.left(),
        right: bounds.right() >= playfield.right(),
        top: bounds.top() <= playfield.top(),
        below: bounds.top() >= playfield.bottom(),
    }
}
