//! Block Breaker - a single-screen arcade block-breaking game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, match state)
//! - `config`: Data-driven playfield and tuning values
//! - `input`: Discrete key/click events delivered through a queue
//! - `game`: Frame driver tying input, clock, simulation and drawing together
//! - `render`: Backend-agnostic draw pass

pub mod config;
pub mod game;
pub mod input;
pub mod render;
pub mod sim;

pub use config::{ConfigError, GameConfig};
pub use game::{FrameClock, Game};
pub use input::{InputEvent, InputQueue, InputSender, Key};
pub use render::{Color, Renderer, Sprite};

/// Default layout and tuning constants
pub mod consts {
    /// Playfield dimensions (pixels)
    pub const PLAYFIELD_WIDTH: f32 = 640.0;
    pub const PLAYFIELD_HEIGHT: f32 = 750.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 104.0;
    pub const PADDLE_HEIGHT: f32 = 24.0;
    pub const PADDLE_START_Y: f32 = 700.0;
    /// Horizontal speed (pixels/s)
    pub const PADDLE_SPEED: f32 = 600.0;

    /// Ball defaults
    pub const BALL_SIZE: f32 = 22.0;
    pub const BALL_SPAWN_X: f32 = PLAYFIELD_WIDTH / 2.0 - BALL_SIZE / 2.0;
    pub const BALL_SPAWN_Y: f32 = 675.0;
    /// Scalar speed (pixels/s); the velocity itself is kept unit length
    pub const BALL_SPEED: f32 = 450.0;

    /// Block rows
    pub const BLOCK_COLUMNS: usize = 10;
    pub const BLOCK_WIDTH: f32 = 64.0;
    pub const BLOCK_HEIGHT: f32 = 32.0;
    pub const BLOCK_TOP: f32 = 100.0;
    pub const BLOCK_POINTS: u32 = 1;

    /// Bonus items
    pub const BONUS_LANES: [f32; 5] = [400.0, 320.0, 154.0, 270.0, 550.0];
    pub const BONUS_HOME_Y: f32 = -30.0;
    pub const BONUS_SIZE: f32 = 32.0;
    /// Seconds between releases
    pub const BONUS_PERIOD: f32 = 5.0;
    pub const BONUS_FALL_SPEED: f32 = 100.0;
    pub const BONUS_POINTS: u32 = 5;

    pub const STARTING_LIVES: u32 = 3;
    /// Longest frame the driver will simulate in one step (seconds)
    pub const MAX_FRAME_DT: f32 = 0.05;
}
