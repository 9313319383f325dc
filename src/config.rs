//! Tuning and layout configuration
//!
//! Every section uses `#[serde(default)]` so a config file only needs to list
//! the values it overrides. Defaults come from [`crate::consts`].

use std::fs;
use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::LatchMode;
use crate::sim::Rect;

/// Errors that prevent a match from being set up
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayfieldConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for PlayfieldConfig {
    fn default() -> Self {
        Self {
            width: PLAYFIELD_WIDTH,
            height: PLAYFIELD_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaddleConfig {
    pub width: f32,
    pub height: f32,
    /// Top edge of the paddle; x starts centred
    pub start_y: f32,
    /// Pixels per second
    pub speed: f32,
    /// Clear the held direction flag when the paddle reaches a wall
    pub clear_flag_at_edge: bool,
}

impl Default for PaddleConfig {
    fn default() -> Self {
        Self {
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
            start_y: PADDLE_START_Y,
            speed: PADDLE_SPEED,
            clear_flag_at_edge: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallConfig {
    pub width: f32,
    pub height: f32,
    /// Respawn point after a miss (top-left corner)
    pub spawn: Vec2,
    /// Pixels per second along the unit direction
    pub speed: f32,
    /// Initial direction of travel (normalized on use)
    pub launch_direction: Vec2,
    pub latch_mode: LatchMode,
}

impl Default for BallConfig {
    fn default() -> Self {
        Self {
            width: BALL_SIZE,
            height: BALL_SIZE,
            spawn: Vec2::new(BALL_SPAWN_X, BALL_SPAWN_Y),
            speed: BALL_SPEED,
            launch_direction: Vec2::new(1.0, -1.0),
            latch_mode: LatchMode::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockConfig {
    /// Blocks per row
    pub columns: usize,
    pub width: f32,
    pub height: f32,
    /// Top edge of the first row
    pub top: f32,
    pub points: u32,
}

impl Default for BlockConfig {
    fn default() -> Self {
        Self {
            columns: BLOCK_COLUMNS,
            width: BLOCK_WIDTH,
            height: BLOCK_HEIGHT,
            top: BLOCK_TOP,
            points: BLOCK_POINTS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BonusConfig {
    /// Home x position of each lane, in spawn order
    pub lanes: Vec<f32>,
    /// Off-screen y the items rest at while hidden
    pub home_y: f32,
    pub width: f32,
    pub height: f32,
    /// Seconds between spawns
    pub period: f32,
    /// Pixels per second
    pub fall_speed: f32,
    pub points: u32,
}

impl Default for BonusConfig {
    fn default() -> Self {
        Self {
            lanes: BONUS_LANES.to_vec(),
            home_y: BONUS_HOME_Y,
            width: BONUS_SIZE,
            height: BONUS_SIZE,
            period: BONUS_PERIOD,
            fall_speed: BONUS_FALL_SPEED,
            points: BONUS_POINTS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchRules {
    pub lives: u32,
    /// Longest frame the simulation will integrate in one step
    pub max_frame_dt: f32,
}

impl Default for MatchRules {
    fn default() -> Self {
        Self {
            lives: STARTING_LIVES,
            max_frame_dt: MAX_FRAME_DT,
        }
    }
}

/// Complete game configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub playfield: PlayfieldConfig,
    pub paddle: PaddleConfig,
    pub ball: BallConfig,
    pub blocks: BlockConfig,
    pub bonus: BonusConfig,
    pub rules: MatchRules,
}

impl GameConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, Option<ConfigError>) {
        match Self::load_from_file(path) {
            Ok(cfg) => (cfg, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    /// The playfield as a box anchored at the origin
    pub fn playfield_rect(&self) -> Rect {
        Rect::new(
            Vec2::ZERO,
            Vec2::new(self.playfield.width, self.playfield.height),
        )
    }

    /// Hard errors: values a match cannot run with
    pub fn check(&self) -> Result<(), ConfigError> {
        let finite = [
            self.playfield.width,
            self.playfield.height,
            self.paddle.width,
            self.paddle.height,
            self.paddle.start_y,
            self.paddle.speed,
            self.ball.width,
            self.ball.height,
            self.ball.spawn.x,
            self.ball.spawn.y,
            self.ball.speed,
            self.ball.launch_direction.x,
            self.ball.launch_direction.y,
            self.blocks.width,
            self.blocks.height,
            self.blocks.top,
            self.bonus.home_y,
            self.bonus.width,
            self.bonus.height,
            self.bonus.period,
            self.bonus.fall_speed,
            self.rules.max_frame_dt,
        ];
        if finite.iter().any(|v| !v.is_finite()) || self.bonus.lanes.iter().any(|v| !v.is_finite())
        {
            return Err(ConfigError::Invalid("non-finite value".into()));
        }
        if self.playfield.width <= 0.0 || self.playfield.height <= 0.0 {
            return Err(ConfigError::Invalid(
                "playfield dimensions must be > 0".into(),
            ));
        }
        if self.paddle.width <= 0.0 || self.paddle.width > self.playfield.width {
            return Err(ConfigError::Invalid(format!(
                "paddle.width {} must be in (0, {}]",
                self.paddle.width, self.playfield.width
            )));
        }
        if self.ball.width <= 0.0 || self.ball.height <= 0.0 {
            return Err(ConfigError::Invalid("ball size must be > 0".into()));
        }
        if self.blocks.columns == 0 {
            return Err(ConfigError::Invalid("blocks.columns must be > 0".into()));
        }
        if self.bonus.lanes.is_empty() {
            return Err(ConfigError::Invalid(
                "bonus.lanes must list at least one lane".into(),
            ));
        }
        if self.rules.lives == 0 {
            return Err(ConfigError::Invalid("rules.lives must be > 0".into()));
        }
        if self.rules.max_frame_dt <= 0.0 {
            return Err(ConfigError::Invalid(
                "rules.max_frame_dt must be > 0".into(),
            ));
        }
        Ok(())
    }

    /// Soft warnings: suspicious but playable values. Log each with `warn!`.
    pub fn validate(&self) -> Vec<String> {
        let mut w = Vec::new();
        let row_width = self.blocks.columns as f32 * self.blocks.width;
        if row_width > self.playfield.width {
            w.push(format!(
                "block rows are {row_width} wide; blocks past x={} are unreachable",
                self.playfield.width
            ));
        }
        if self.ball.launch_direction.length_squared() < 1e-6 {
            w.push("ball.launch_direction is zero; falling back to straight up".into());
        }
        if self.ball.speed * self.rules.max_frame_dt > self.blocks.height {
            w.push(format!(
                "ball may tunnel: {} px per max frame exceeds block height {}",
                self.ball.speed * self.rules.max_frame_dt,
                self.blocks.height
            ));
        }
        if self.paddle.speed <= 0.0 {
            w.push("paddle.speed is not positive; paddle cannot move".into());
        }
        if self.paddle.start_y + self.paddle.height > self.playfield.height {
            w.push("paddle starts below the playfield".into());
        }
        if self.bonus.period <= 0.0 {
            w.push("bonus.period <= 0; bonus items spawn back to back".into());
        }
        if self.bonus.fall_speed <= 0.0 {
            w.push("bonus.fall_speed <= 0; bonus items never fall".into());
        }
        for (i, x) in self.bonus.lanes.iter().enumerate() {
            if *x < 0.0 || *x + self.bonus.width > self.playfield.width {
                w.push(format!("bonus lane {i} at x={x} is outside the playfield"));
            }
        }
        w
    }
}
