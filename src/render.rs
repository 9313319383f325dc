//! Backend-agnostic draw pass
//!
//! The simulation never draws. Each frame the driver hands the current state
//! to [`render`], which issues sprite and text calls against a [`Renderer`].

use glam::Vec2;

use crate::config::GameConfig;
use crate::sim::{BlockRow, GameMode, MatchState, Rect};

/// Sprite kinds a backend needs to provide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sprite {
    Paddle,
    Ball,
    BlueBlock,
    GreenBlock,
    Bonus,
}

impl From<BlockRow> for Sprite {
    fn from(row: BlockRow) -> Self {
        match row {
            BlockRow::Blue => Sprite::BlueBlock,
            BlockRow::Green => Sprite::GreenBlock,
        }
    }
}

/// Linear RGBA
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }
}

/// Drawing surface
pub trait Renderer {
    fn draw_sprite(&mut self, sprite: Sprite, bounds: Rect);
    fn draw_text(&mut self, text: &str, pos: Vec2, scale: f32, color: Color);
}

pub const MENU_PROMPT: &str = "Press enter to start the game";
pub const MENU_PROMPT_POS: Vec2 = Vec2::new(150.0, 360.0);
pub const LIVES_POS: Vec2 = Vec2::new(550.0, 50.0);
pub const SCORE_POS: Vec2 = Vec2::new(500.0, 75.0);
pub const LOST_TEXT: &str = "You Lose";
pub const WON_TEXT: &str = "Congratulations";
const BANNER_SCALE: f32 = 2.0;

/// Draw one frame of the current match
pub fn render(state: &MatchState, cfg: &GameConfig, renderer: &mut impl Renderer) {
    match state.mode {
        GameMode::Menu => {
            renderer.draw_text(MENU_PROMPT, MENU_PROMPT_POS, 1.0, Color::WHITE);
        }
        GameMode::Playing => {
            renderer.draw_text(&format!("Life:{}", state.lives), LIVES_POS, 1.0, Color::WHITE);
            renderer.draw_text(&format!("Score:{}", state.score), SCORE_POS, 1.0, Color::WHITE);

            renderer.draw_sprite(Sprite::Paddle, state.paddle.entity.bounds());
            renderer.draw_sprite(Sprite::Ball, state.ball.entity.bounds());
            for block in state.blocks.iter().filter(|b| b.entity.visible) {
                renderer.draw_sprite(block.row.into(), block.entity.bounds());
            }
            for lane in state.bonus.lanes.iter().filter(|l| l.item.visible) {
                renderer.draw_sprite(Sprite::Bonus, lane.item.bounds());
            }
        }
        GameMode::Won | GameMode::Lost => {
            let text = if state.mode == GameMode::Won {
                WON_TEXT
            } else {
                LOST_TEXT
            };
            let pos = Vec2::new(cfg.playfield.width / 3.0, cfg.playfield.height / 2.0);
            renderer.draw_text(text, pos, BANNER_SCALE, Color::WHITE);
        }
    }
}
