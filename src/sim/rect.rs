//! Axis-aligned box geometry for entities and the playfield
//!
//! A box is defined by its top-left origin and its size. Screen coordinates:
//! x grows to the right, y grows downward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub origin: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl Rect {
    pub fn new(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.origin.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.origin.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.origin.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.origin.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.origin + self.size * 0.5
    }

    /// Overlap test. Touching edges count as overlapping.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() <= other.right()
            && other.left() <= self.right()
            && self.top() <= other.bottom()
            && other.top() <= self.bottom()
    }

    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.left()
            && point.x <= self.right()
            && point.y >= self.top()
            && point.y <= self.bottom()
    }
}
