//! Match state and core simulation types
//!
//! Everything the simulation mutates lives in [`MatchState`], which is passed
//! by reference into [`super::tick`]. The render pass only reads it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::ball::{Ball, ContactState};
use super::blocks::BlockField;
use super::bonus::BonusSpawner;
use super::entity::Entity;
use crate::config::{GameConfig, PaddleConfig};

/// Top-level match phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    /// Waiting for the confirm input
    Menu,
    /// Active gameplay
    Playing,
    /// Every block destroyed
    Won,
    /// Out of lives
    Lost,
}

impl GameMode {
    pub fn is_terminal(self) -> bool {
        matches!(self, GameMode::Won | GameMode::Lost)
    }
}

/// Level-triggered paddle controls, set and cleared by key press/release
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Controls {
    pub paddle_left: bool,
    pub paddle_right: bool,
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub entity: Entity,
    pub contact: ContactState,
}

impl Paddle {
    /// Centred horizontally at the configured height
    pub fn new(cfg: &PaddleConfig, playfield_width: f32) -> Self {
        let x = playfield_width / 2.0 - cfg.width / 2.0;
        Self {
            entity: Entity::new(Vec2::new(x, cfg.start_y), Vec2::new(cfg.width, cfg.height)),
            contact: ContactState::Free,
        }
    }

    /// Move according to the held direction flags, clamped to the playfield
    ///
    /// A flag whose direction is blocked by a wall is cleared when
    /// `clear_flag_at_edge` is set, so the key has to be pressed again.
    pub fn steer(
        &mut self,
        controls: &mut Controls,
        dt: f32,
        cfg: &PaddleConfig,
        playfield_width: f32,
    ) {
        let max_x = (playfield_width - self.entity.size.x).max(0.0);
        let step = cfg.speed * dt;

        if controls.paddle_left {
            if self.entity.pos.x <= 0.0 {
                if cfg.clear_flag_at_edge {
                    controls.paddle_left = false;
                }
            } else {
                self.entity.pos.x -= step;
            }
        }

        if controls.paddle_right {
            if self.entity.pos.x >= max_x {
                if cfg.clear_flag_at_edge {
                    controls.paddle_right = false;
                }
            } else {
                self.entity.pos.x += step;
            }
        }

        self.entity.pos.x = self.entity.pos.x.clamp(0.0, max_x);
    }
}

/// Complete match state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchState {
    pub mode: GameMode,
    pub lives: u32,
    pub score: u64,
    /// Frames simulated while playing
    pub frames: u64,
    /// Seconds simulated while playing
    pub elapsed: f64,
    pub controls: Controls,
    pub paddle: Paddle,
    pub ball: Ball,
    pub blocks: BlockField,
    pub bonus: BonusSpawner,
}

impl MatchState {
    /// Fresh match in the menu, with every entity at its start position
    pub fn new(cfg: &GameConfig) -> Self {
        Self {
            mode: GameMode::Menu,
            lives: cfg.rules.lives,
            score: 0,
            frames: 0,
            elapsed: 0.0,
            controls: Controls::default(),
            paddle: Paddle::new(&cfg.paddle, cfg.playfield.width),
            ball: Ball::new(0, &cfg.ball),
            blocks: BlockField::new(&cfg.blocks),
            bonus: BonusSpawner::new(&cfg.bonus),
        }
    }

    pub fn remaining_blocks(&self) -> usize {
        self.blocks.remaining()
    }
}
