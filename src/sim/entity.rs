//! Positioned, sized game objects
//!
//! Entities are never freed during a match. Hiding an entity is how it is
//! "destroyed"; hidden entities take no part in collisions.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;

/// A paddle, ball, block or bonus item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Top-left corner in playfield coordinates
    pub pos: Vec2,
    /// Visual size (width, height)
    pub size: Vec2,
    pub visible: bool,
    /// Direction of travel; only meaningful for the ball and bonus items
    pub vel: Vec2,
}

impl Entity {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            size,
            visible: true,
            vel: Vec2::ZERO,
        }
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Bounding box at the current position
    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    /// True if both entities are visible and their boxes overlap
    pub fn touches(&self, other: &Entity) -> bool {
        self.visible && other.visible && self.bounds().overlaps(&other.bounds())
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Move to `pos` and hide
    pub fn park(&mut self, pos: Vec2) {
        self.pos = pos;
        self.visible = false;
    }
}
