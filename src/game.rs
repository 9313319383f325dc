//! Frame driver
//!
//! [`Game`] owns the config, the match state and the input queue. The host
//! calls [`Game::update`] once per frame with the total elapsed time and then
//! [`Game::render`]; everything in between is deterministic.

use std::time::Duration;

use glam::Vec2;

use crate::config::{ConfigError, GameConfig};
use crate::input::{InputEvent, InputQueue, InputSender, Key};
use crate::render::{self, Renderer};
use crate::sim::{MatchState, TickInput, TickReport, tick};

/// Turns a monotonic elapsed time into per-frame deltas
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Option<Duration>,
    max_dt: f32,
}

impl FrameClock {
    pub fn new(max_dt: f32) -> Self {
        Self { last: None, max_dt }
    }

    /// Seconds since the previous call, clamped to `max_dt`
    ///
    /// The first call and any call with an earlier time than the previous one
    /// return 0.
    pub fn delta(&mut self, total_elapsed: Duration) -> f32 {
        let Some(last) = self.last.replace(total_elapsed) else {
            return 0.0;
        };
        let dt = total_elapsed.saturating_sub(last).as_secs_f32();
        if dt > self.max_dt {
            log::debug!("frame took {dt:.3}s, clamped to {:.3}s", self.max_dt);
            self.max_dt
        } else {
            dt
        }
    }
}

pub struct Game {
    config: GameConfig,
    state: MatchState,
    queue: InputQueue,
    clock: FrameClock,
    exit_requested: bool,
}

impl Game {
    /// Set up a match in the menu. Fails on configs the simulation cannot run.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.check()?;
        for warning in config.validate() {
            log::warn!("config: {warning}");
        }
        let state = MatchState::new(&config);
        let clock = FrameClock::new(config.rules.max_frame_dt);
        log::info!(
            "match ready: {} blocks, {} lives",
            state.remaining_blocks(),
            state.lives
        );
        Ok(Self {
            config,
            state,
            queue: InputQueue::new(),
            clock,
            exit_requested: false,
        })
    }

    pub fn input_sender(&self) -> InputSender {
        self.queue.sender()
    }

    /// Apply queued input and advance the simulation to `total_elapsed`
    pub fn update(&mut self, total_elapsed: Duration) -> TickReport {
        let mut input = TickInput::default();
        for event in self.queue.drain() {
            self.apply(event, &mut input);
        }
        let dt = self.clock.delta(total_elapsed);
        tick(&mut self.state, &input, &self.config, dt)
    }

    fn apply(&mut self, event: InputEvent, input: &mut TickInput) {
        match event {
            InputEvent::KeyPressed(Key::Left) => self.state.controls.paddle_left = true,
            InputEvent::KeyReleased(Key::Left) => self.state.controls.paddle_left = false,
            InputEvent::KeyPressed(Key::Right) => self.state.controls.paddle_right = true,
            InputEvent::KeyReleased(Key::Right) => self.state.controls.paddle_right = false,
            InputEvent::KeyPressed(Key::Confirm) => input.confirm = true,
            InputEvent::KeyPressed(Key::Exit) => {
                if !self.exit_requested {
                    log::info!("exit requested");
                }
                self.exit_requested = true;
            }
            InputEvent::KeyReleased(Key::Confirm | Key::Exit) => {}
            InputEvent::Click { x, y } => {
                let inside = self.config.playfield_rect().contains_point(Vec2::new(x, y));
                log::debug!("click at ({x}, {y}), inside playfield: {inside}");
            }
        }
    }

    pub fn render(&self, renderer: &mut impl Renderer) {
        render::render(&self.state, &self.config, renderer);
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    /// Back to the menu with a fresh match. Queued input and the clock survive.
    pub fn restart(&mut self) {
        self.state = MatchState::new(&self.config);
        log::info!("match restarted");
    }
}
