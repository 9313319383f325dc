//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only advances through the `dt` passed to [`tick`]
//! - No randomness
//! - Stable iteration order (blocks by id, bonus lanes by index)
//! - No rendering, input device or platform dependencies

pub mod ball;
pub mod blocks;
pub mod bonus;
pub mod collision;
pub mod entity;
pub mod rect;
pub mod state;
pub mod tick;

pub use ball::{Ball, CollisionEvent, ContactState, LatchMode, Obstacles, Wall};
pub use blocks::{Block, BlockField, BlockRow};
pub use bonus::{BonusEvent, BonusLane, BonusSpawner};
pub use collision::{Axis, VelocityExt, WallContact, reflect_velocity, wall_contact};
pub use entity::Entity;
pub use rect::Rect;
pub use state::{Controls, GameMode, MatchState, Paddle};
pub use tick::{TickInput, TickReport, tick};
