//! Block Breaker headless runner
//!
//! Plays a match with a simple autopilot feeding the input queue, renders
//! through a counting backend, and reports the outcome.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use glam::Vec2;

use block_breaker::sim::{MatchState, Rect};
use block_breaker::{Color, Game, GameConfig, InputSender, Key, Renderer, Sprite};

#[derive(Parser, Debug)]
#[command(about = "Run a headless block breaker match with an autopilot", version)]
struct Args {
    /// JSON config file; missing sections use defaults
    #[arg(long)]
    config: Option<PathBuf>,
    /// Stop after this many frames
    #[arg(long, default_value_t = 20_000)]
    frames: u64,
    /// Simulated frames per second
    #[arg(long, default_value_t = 60.0)]
    fps: f64,
    /// Print the final match state as JSON
    #[arg(long)]
    dump_state: bool,
}

/// Counts draw calls instead of drawing
#[derive(Debug, Default)]
struct LogRenderer {
    sprites: u64,
    texts: u64,
}

impl Renderer for LogRenderer {
    fn draw_sprite(&mut self, sprite: Sprite, bounds: Rect) {
        self.sprites += 1;
        log::trace!("sprite {sprite:?} at {:?}", bounds.origin);
    }

    fn draw_text(&mut self, text: &str, pos: Vec2, _scale: f32, _color: Color) {
        self.texts += 1;
        log::trace!("text {text:?} at {pos:?}");
    }
}

/// Hold Left/Right so the paddle centre chases the ball centre
fn autopilot(state: &MatchState, input: &InputSender) {
    let paddle = state.paddle.entity.bounds().center().x;
    let ball = state.ball.entity.bounds().center().x;
    let dead_zone = state.paddle.entity.size.x / 4.0;
    let want_left = ball < paddle - dead_zone;
    let want_right = ball > paddle + dead_zone;

    let held = state.controls;
    if want_left != held.paddle_left {
        if want_left {
            input.press(Key::Left);
        } else {
            input.release(Key::Left);
        }
    }
    if want_right != held.paddle_right {
        if want_right {
            input.press(Key::Right);
        } else {
            input.release(Key::Right);
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    anyhow::ensure!(
        args.fps.is_finite() && args.fps > 0.0,
        "--fps must be positive"
    );

    let config = match &args.config {
        Some(path) => GameConfig::load_from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => GameConfig::default(),
    };
    let mut game = Game::new(config).context("setting up match")?;
    let input = game.input_sender();
    let mut renderer = LogRenderer::default();

    log::info!("Block Breaker starting ({} fps, {} frame limit)", args.fps, args.frames);
    input.press(Key::Confirm);

    let mut frame = 0u64;
    while frame < args.frames && !game.exit_requested() {
        let now = Duration::from_secs_f64(frame as f64 / args.fps);
        game.update(now);
        game.render(&mut renderer);
        frame += 1;

        if game.state().mode.is_terminal() {
            break;
        }
        autopilot(game.state(), &input);
    }

    let state = game.state();
    log::info!(
        "finished after {frame} frames: {:?}, score {}, lives {}, blocks left {} ({} sprites, {} texts drawn)",
        state.mode,
        state.score,
        state.lives,
        state.remaining_blocks(),
        renderer.sprites,
        renderer.texts
    );

    if args.dump_state {
        println!("{}", serde_json::to_string_pretty(state)?);
    }
    Ok(())
}
