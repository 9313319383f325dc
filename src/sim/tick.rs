//! Per-frame simulation step
//!
//! Core game loop that advances the match by one frame of `dt` seconds.

use super::ball::{self, CollisionEvent, Obstacles};
use super::bonus::BonusEvent;
use super::state::{GameMode, MatchState};
use crate::config::GameConfig;

/// One-shot inputs for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Start the match from the menu
    pub confirm: bool,
}

/// Everything that happened during one frame
#[derive(Debug, Clone, Default)]
pub struct TickReport {
    pub collisions: Vec<CollisionEvent>,
    pub bonus: Vec<BonusEvent>,
    /// Mode change this frame, if any
    pub transition: Option<(GameMode, GameMode)>,
}

/// Advance the match by one frame
///
/// Outside of [`GameMode::Playing`] nothing moves: the menu only waits for
/// `confirm`, and the won/lost modes are final.
pub fn tick(
    state: &mut MatchState,
    input: &TickInput,
    cfg: &GameConfig,
    dt: f32,
) -> TickReport {
    let mut report = TickReport::default();
    let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

    match state.mode {
        GameMode::Menu => {
            if input.confirm {
                set_mode(state, GameMode::Playing, &mut report);
            }
            return report;
        }
        GameMode::Won | GameMode::Lost => return report,
        GameMode::Playing => {}
    }

    state.frames += 1;
    state.elapsed += f64::from(dt);

    let playfield = cfg.playfield_rect();

    // Paddle
    state
        .paddle
        .steer(&mut state.controls, dt, &cfg.paddle, cfg.playfield.width);

    // Ball
    report.collisions = ball::advance(
        dt,
        &mut state.ball,
        Obstacles {
            paddle: &state.paddle.entity,
            paddle_contact: &mut state.paddle.contact,
            blocks: &mut state.blocks,
        },
        &playfield,
        &cfg.ball,
    );
    for event in &report.collisions {
        match event {
            CollisionEvent::Block { .. } => {
                state.score += u64::from(cfg.blocks.points);
            }
            CollisionEvent::Miss => {
                state.lives = state.lives.saturating_sub(1);
                log::debug!("life lost, {} left", state.lives);
            }
            _ => {}
        }
    }

    // Bonus items
    let (bonus_score, bonus_events) =
        state
            .bonus
            .advance(dt, &state.paddle.entity, playfield.bottom(), &cfg.bonus);
    state.score += u64::from(bonus_score);
    report.bonus = bonus_events;

    // Terminal conditions; running out of lives wins a tie
    if state.lives == 0 {
        set_mode(state, GameMode::Lost, &mut report);
    } else if state.blocks.remaining() == 0 {
        set_mode(state, GameMode::Won, &mut report);
    }

    report
}

fn set_mode(state: &mut MatchState, mode: GameMode, report: &mut TickReport) {
    let from = state.mode;
    state.mode = mode;
    report.transition = Some((from, mode));
    log::info!(
        "{:?} -> {:?} (score {}, lives {}, blocks left {})",
        from,
        mode,
        state.score,
        state.lives,
        state.blocks.remaining()
    );
}
