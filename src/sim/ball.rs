//! Ball integration and collision response
//!
//! Each step moves the ball along its unit direction, bounces it off the
//! side and top walls, respawns it after it falls off the bottom, and then
//! resolves paddle and block contacts. Every bounce is an axis flip; each
//! axis is flipped at most once per step no matter how many things were hit.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::blocks::{BlockField, BlockRow};
use super::collision::{Axis, VelocityExt, wall_contact};
use super::entity::Entity;
use super::rect::Rect;
use crate::config::BallConfig;

/// How repeated paddle/block contacts are suppressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LatchMode {
    /// Each paddle and block tracks its own contact with the ball and only
    /// responds again once their boxes have separated
    #[default]
    Contact,
    /// Two shared latches (paddle, block) that exclude each other and are
    /// released by any side or top wall bounce
    Legacy,
}

/// Per-entity contact with a ball
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ContactState {
    #[default]
    Free,
    /// Overlapping the ball with this id; no further response until separated
    InContactWith(u32),
}

impl ContactState {
    /// Update from this step's overlap; true on a fresh contact
    pub fn update(&mut self, ball_id: u32, overlapping: bool) -> bool {
        match (*self, overlapping) {
            (ContactState::Free, true) => {
                *self = ContactState::InContactWith(ball_id);
                true
            }
            (ContactState::InContactWith(_), false) => {
                *self = ContactState::Free;
                false
            }
            _ => false,
        }
    }
}

/// The side or top wall
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wall {
    Left,
    Right,
    Top,
}

/// Something the ball ran into during a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionEvent {
    Wall(Wall),
    Paddle,
    Block { id: u32, row: BlockRow },
    /// Fell past the bottom of the playfield
    Miss,
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub id: u32,
    pub entity: Entity,
    /// Legacy-mode latch set by a paddle bounce
    pub paddle_latch: bool,
    /// Legacy-mode latch set by a block hit
    pub block_latch: bool,
}

impl Ball {
    pub fn new(id: u32, cfg: &BallConfig) -> Self {
        let size = Vec2::new(cfg.width, cfg.height);
        let dir = cfg.launch_direction.unit_or(Vec2::NEG_Y);
        Self {
            id,
            entity: Entity::new(cfg.spawn, size).with_velocity(dir),
            paddle_latch: false,
            block_latch: false,
        }
    }
}

/// What the ball collides against besides the walls
pub struct Obstacles<'a> {
    pub paddle: &'a Entity,
    pub paddle_contact: &'a mut ContactState,
    pub blocks: &'a mut BlockField,
}

/// Advance the ball by `dt` seconds and resolve every collision
///
/// Lives and score are not touched here; the caller applies them from the
/// returned events.
pub fn advance(
    dt: f32,
    ball: &mut Ball,
    obstacles: Obstacles<'_>,
    playfield: &Rect,
    cfg: &BallConfig,
) -> Vec<CollisionEvent> {
    let mut events = Vec::new();
    let mut vel = ball.entity.vel;
    let mut flip_x = false;
    let mut flip_y = false;

    ball.entity.pos += vel * cfg.speed * dt;

    // --- WALLS ---
    let walls = wall_contact(&ball.entity.bounds(), playfield);
    let max_x = playfield.right() - ball.entity.size.x;
    if walls.left {
        ball.entity.pos.x = playfield.left();
        if vel.x < 0.0 {
            flip_x = true;
            events.push(CollisionEvent::Wall(Wall::Left));
        }
    } else if walls.right {
        ball.entity.pos.x = max_x.max(playfield.left());
        if vel.x > 0.0 {
            flip_x = true;
            events.push(CollisionEvent::Wall(Wall::Right));
        }
    }
    if walls.top {
        ball.entity.pos.y = playfield.top();
        if vel.y < 0.0 {
            flip_y = true;
            events.push(CollisionEvent::Wall(Wall::Top));
        }
    }
    if flip_x || flip_y {
        ball.paddle_latch = false;
        ball.block_latch = false;
    }

    if walls.below {
        // Direction is kept; only the vertical component turns around
        flip_y = true;
        ball.entity.pos = cfg.spawn;
        events.push(CollisionEvent::Miss);
        log::debug!("ball {} missed, respawning at {}", ball.id, cfg.spawn);
    }

    // --- PADDLE AND BLOCKS ---
    let hit_y = match cfg.latch_mode {
        LatchMode::Contact => resolve_contacts(ball, obstacles, &mut events),
        LatchMode::Legacy => resolve_latches(ball, obstacles, &mut events),
    };
    flip_y |= hit_y;

    if flip_x {
        vel = vel.negate_axis(Axis::Horizontal);
    }
    if flip_y {
        vel = vel.negate_axis(Axis::Vertical);
    }
    ball.entity.vel = vel.unit_or(cfg.launch_direction);

    events
}

/// Per-entity contact tracking. Returns true if the ball should bounce.
fn resolve_contacts(
    ball: &Ball,
    obstacles: Obstacles<'_>,
    events: &mut Vec<CollisionEvent>,
) -> bool {
    let mut bounce = false;

    if obstacles
        .paddle_contact
        .update(ball.id, ball.entity.touches(obstacles.paddle))
    {
        bounce = true;
        events.push(CollisionEvent::Paddle);
    }

    let mut hits = Vec::new();
    for block in obstacles.blocks.iter_mut() {
        let overlapping = ball.entity.touches(&block.entity);
        if block.contact.update(ball.id, overlapping) {
            hits.push((block.id, block.row));
        }
    }
    for (id, row) in hits {
        if obstacles.blocks.destroy(id) {
            bounce = true;
            events.push(CollisionEvent::Block { id, row });
            log::debug!("block {id} destroyed");
        }
    }

    bounce
}

/// Shared paddle/block latches. Returns true if the ball should bounce.
fn resolve_latches(
    ball: &mut Ball,
    obstacles: Obstacles<'_>,
    events: &mut Vec<CollisionEvent>,
) -> bool {
    let mut bounce = false;

    if !ball.paddle_latch && ball.entity.touches(obstacles.paddle) {
        bounce = true;
        ball.paddle_latch = true;
        ball.block_latch = false;
        events.push(CollisionEvent::Paddle);
    }

    if !ball.block_latch {
        let hits: Vec<(u32, BlockRow)> = obstacles
            .blocks
            .standing()
            .filter(|b| ball.entity.touches(&b.entity))
            .map(|b| (b.id, b.row))
            .collect();
        for (id, row) in hits {
            if obstacles.blocks.destroy(id) {
                bounce = true;
                ball.paddle_latch = false;
                ball.block_latch = true;
                events.push(CollisionEvent::Block { id, row });
                log::debug!("block {id} destroyed");
            }
        }
    }

    bounce
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BlockConfig, GameConfig};

    struct Fixture {
        cfg: GameConfig,
        ball: Ball,
        paddle: Entity,
        paddle_contact: ContactState,
        blocks: BlockField,
    }

    impl Fixture {
        fn new(latch_mode: LatchMode) -> Self {
            let mut cfg = GameConfig::default();
            cfg.ball.latch_mode = latch_mode;
            Self {
                ball: Ball::new(0, &cfg.ball),
                paddle: Entity::new(Vec2::new(268.0, 700.0), Vec2::new(104.0, 24.0)),
                paddle_contact: ContactState::Free,
                blocks: BlockField::new(&cfg.blocks),
                cfg,
            }
        }

        fn empty_field(latch_mode: LatchMode) -> Self {
            let mut f = Self::new(latch_mode);
            f.blocks = BlockField::new(&BlockConfig {
                columns: 1,
                top: -1000.0,
                ..BlockConfig::default()
            });
            f
        }

        fn step(&mut self, dt: f32) -> Vec<CollisionEvent> {
            let playfield = self.cfg.playfield_rect();
            advance(
                dt,
                &mut self.ball,
                Obstacles {
                    paddle: &self.paddle,
                    paddle_contact: &mut self.paddle_contact,
                    blocks: &mut self.blocks,
                },
                &playfield,
                &self.cfg.ball,
            )
        }

        fn place(&mut self, x: f32, y: f32, vel: Vec2) {
            self.ball.entity.pos = Vec2::new(x, y);
            self.ball.entity.vel = vel.normalize();
        }
    }

    #[test]
    fn test_integrates_along_direction() {
        let mut f = Fixture::empty_field(LatchMode::Contact);
        f.place(309.0, 300.0, Vec2::Y);
        let events = f.step(0.1);
        assert!(events.is_empty());
        assert!((f.ball.entity.pos.y - (300.0 + f.cfg.ball.speed * 0.1)).abs() < 1e-3);
        assert_eq!(f.ball.entity.pos.x, 309.0);
    }

    #[test]
    fn test_bottom_miss_respawns_and_turns_around() {
        let mut f = Fixture::empty_field(LatchMode::Contact);
        f.place(309.0, 375.0, Vec2::Y);
        let events = f.step(1.0);
        assert_eq!(events, vec![CollisionEvent::Miss]);
        assert_eq!(f.ball.entity.pos, f.cfg.ball.spawn);
        assert_eq!(f.ball.entity.vel, Vec2::NEG_Y);
    }

    #[test]
    fn test_miss_keeps_horizontal_direction() {
        let mut f = Fixture::empty_field(LatchMode::Contact);
        f.place(100.0, 740.0, Vec2::new(1.0, 1.0));
        let events = f.step(0.1);
        assert_eq!(events, vec![CollisionEvent::Miss]);
        assert!(f.ball.entity.vel.x > 0.0);
        assert!(f.ball.entity.vel.y < 0.0);
    }

    #[test]
    fn test_left_wall_bounce() {
        let mut f = Fixture::empty_field(LatchMode::Contact);
        f.place(2.0, 300.0, Vec2::new(-1.0, -1.0));
        let events = f.step(0.02);
        assert_eq!(events, vec![CollisionEvent::Wall(Wall::Left)]);
        assert_eq!(f.ball.entity.pos.x, 0.0);
        assert!(f.ball.entity.vel.x > 0.0);
        assert!(f.ball.entity.vel.y < 0.0);
    }

    #[test]
    fn test_right_wall_bounce() {
        let mut f = Fixture::empty_field(LatchMode::Contact);
        f.place(615.0, 300.0, Vec2::new(1.0, 0.5));
        let events = f.step(0.02);
        assert_eq!(events, vec![CollisionEvent::Wall(Wall::Right)]);
        assert_eq!(f.ball.entity.bounds().right(), 640.0);
        assert!(f.ball.entity.vel.x < 0.0);
    }

    #[test]
    fn test_top_wall_bounce() {
        let mut f = Fixture::empty_field(LatchMode::Contact);
        f.place(300.0, 3.0, Vec2::new(0.3, -1.0));
        let events = f.step(0.02);
        assert_eq!(events, vec![CollisionEvent::Wall(Wall::Top)]);
        assert!(f.ball.entity.vel.y > 0.0);
    }

    #[test]
    fn test_corner_flips_both_axes() {
        let mut f = Fixture::empty_field(LatchMode::Contact);
        f.place(1.0, 1.0, Vec2::new(-1.0, -1.0));
        let events = f.step(0.02);
        assert!(events.contains(&CollisionEvent::Wall(Wall::Left)));
        assert!(events.contains(&CollisionEvent::Wall(Wall::Top)));
        assert!(f.ball.entity.vel.x > 0.0 && f.ball.entity.vel.y > 0.0);
    }

    #[test]
    fn test_no_double_bounce_when_leaving_wall() {
        let mut f = Fixture::empty_field(LatchMode::Contact);
        f.place(0.0, 300.0, Vec2::new(1.0, -1.0));
        let events = f.step(0.0);
        assert!(events.is_empty());
        assert!(f.ball.entity.vel.x > 0.0);
    }

    #[test]
    fn test_velocity_stays_unit_length() {
        let mut f = Fixture::empty_field(LatchMode::Contact);
        f.ball.entity.vel = Vec2::new(3.0, -4.0);
        f.step(0.01);
        assert!((f.ball.entity.vel.length() - 1.0).abs() < 1e-5);

        f.ball.entity.vel = Vec2::ZERO;
        f.step(0.01);
        assert!((f.ball.entity.vel.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_paddle_bounce_once_per_contact() {
        let mut f = Fixture::empty_field(LatchMode::Contact);
        f.place(300.0, 676.0, Vec2::new(0.0, 1.0));
        let events = f.step(0.01);
        assert_eq!(events, vec![CollisionEvent::Paddle]);
        assert!(f.ball.entity.vel.y < 0.0);
        assert_eq!(f.paddle_contact, ContactState::InContactWith(0));

        // Still overlapping next step: no second flip
        let events = f.step(0.001);
        assert!(events.is_empty());
        assert!(f.ball.entity.vel.y < 0.0);

        // Separate, then the paddle is free again
        f.place(300.0, 500.0, Vec2::new(0.0, 1.0));
        f.step(0.001);
        assert_eq!(f.paddle_contact, ContactState::Free);
    }

    #[test]
    fn test_block_hit_destroys_and_bounces() {
        let mut f = Fixture::new(LatchMode::Contact);
        // Just under the green row (y 132..164), moving up
        f.place(10.0, 166.0, Vec2::new(0.0, -1.0));
        let events = f.step(0.01);
        assert_eq!(
            events,
            vec![CollisionEvent::Block {
                id: 10,
                row: BlockRow::Green
            }]
        );
        assert_eq!(f.blocks.remaining(), 19);
        assert!(f.ball.entity.vel.y > 0.0);
    }

    #[test]
    fn test_simultaneous_blocks_all_destroyed_single_flip() {
        let mut f = Fixture::new(LatchMode::Contact);
        // Straddling the seam between green blocks 10 and 11
        f.place(55.0, 166.0, Vec2::new(0.0, -1.0));
        let events = f.step(0.01);
        let hits = events
            .iter()
            .filter(|e| matches!(e, CollisionEvent::Block { .. }))
            .count();
        assert_eq!(hits, 2);
        assert_eq!(f.blocks.remaining(), 18);
        assert!(f.ball.entity.vel.y > 0.0);
    }

    #[test]
    fn test_contact_mode_hits_next_block_without_wall() {
        let mut f = Fixture::new(LatchMode::Contact);
        f.place(10.0, 166.0, Vec2::new(0.0, -1.0));
        f.step(0.01);
        // Turn it around by hand and hit the next block along
        f.place(80.0, 166.0, Vec2::new(0.0, -1.0));
        let events = f.step(0.01);
        assert!(matches!(
            events.as_slice(),
            [CollisionEvent::Block { id: 11, .. }]
        ));
    }

    #[test]
    fn test_legacy_block_latch_blocks_second_hit() {
        let mut f = Fixture::new(LatchMode::Legacy);
        f.place(10.0, 166.0, Vec2::new(0.0, -1.0));
        f.step(0.01);
        assert!(f.ball.block_latch);

        f.place(80.0, 166.0, Vec2::new(0.0, -1.0));
        let events = f.step(0.01);
        assert!(events.is_empty());
        assert_eq!(f.blocks.remaining(), 19);
    }

    #[test]
    fn test_legacy_latches_exclude_each_other() {
        let mut f = Fixture::new(LatchMode::Legacy);
        f.place(10.0, 166.0, Vec2::new(0.0, -1.0));
        f.step(0.01);
        assert!(f.ball.block_latch && !f.ball.paddle_latch);

        f.place(300.0, 676.0, Vec2::new(0.0, 1.0));
        let events = f.step(0.01);
        assert_eq!(events, vec![CollisionEvent::Paddle]);
        assert!(f.ball.paddle_latch && !f.ball.block_latch);
    }

    #[test]
    fn test_legacy_wall_releases_latches() {
        let mut f = Fixture::empty_field(LatchMode::Legacy);
        f.ball.paddle_latch = true;
        f.ball.block_latch = true;
        f.place(300.0, 2.0, Vec2::new(0.0, -1.0));
        f.step(0.01);
        assert!(!f.ball.paddle_latch && !f.ball.block_latch);
    }

    #[test]
    fn test_legacy_paddle_latch_suppresses_repeat() {
        let mut f = Fixture::empty_field(LatchMode::Legacy);
        f.place(300.0, 676.0, Vec2::new(0.0, 1.0));
        f.step(0.01);
        assert!(f.ball.paddle_latch);
        f.place(300.0, 676.0, Vec2::new(0.0, 1.0));
        let events = f.step(0.01);
        assert!(events.is_empty());
        assert!(f.ball.entity.vel.y > 0.0);
    }
}
