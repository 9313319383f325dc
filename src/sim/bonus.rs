//! Falling bonus items
//!
//! A repeating countdown releases one item at a time from a fixed set of
//! lanes. Each lane spawns once per cycle, in lane order; when every lane has
//! spawned the cycle starts over. Items fall straight down and are either
//! caught by the paddle (points) or lost off the bottom (no effect).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::Entity;
use crate::config::BonusConfig;

/// One bonus lane and its item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BonusLane {
    /// Where the item rests while hidden
    pub home: Vec2,
    pub item: Entity,
    /// Already released during the current cycle
    pub spawned: bool,
}

impl BonusLane {
    fn reset(&mut self) {
        self.item.park(self.home);
    }
}

/// What happened to bonus items during one step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BonusEvent {
    Spawned { lane: usize },
    Caught { lane: usize },
    Missed { lane: usize },
}

/// Cyclic spawner for the bonus lanes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BonusSpawner {
    pub lanes: Vec<BonusLane>,
    /// Seconds until the next lane may spawn
    pub countdown: f32,
}

impl BonusSpawner {
    pub fn new(cfg: &BonusConfig) -> Self {
        let size = Vec2::new(cfg.width, cfg.height);
        let lanes = cfg
            .lanes
            .iter()
            .map(|&x| {
                let home = Vec2::new(x, cfg.home_y);
                BonusLane {
                    home,
                    item: Entity::new(home, size).with_velocity(Vec2::Y).hidden(),
                    spawned: false,
                }
            })
            .collect();
        Self {
            lanes,
            countdown: cfg.period,
        }
    }

    /// Number of items currently falling
    pub fn in_flight(&self) -> usize {
        self.lanes.iter().filter(|l| l.item.visible).count()
    }

    /// Advance the spawner by `dt` seconds
    ///
    /// Returns the score earned from catches along with what happened.
    pub fn advance(
        &mut self,
        dt: f32,
        paddle: &Entity,
        playfield_bottom: f32,
        cfg: &BonusConfig,
    ) -> (u32, Vec<BonusEvent>) {
        let mut events = Vec::new();
        let mut score = 0;

        self.countdown = (self.countdown - dt).max(0.0);
        if self.countdown <= 0.0 && self.in_flight() == 0 {
            if let Some(lane) = self.lanes.iter().position(|l| !l.spawned) {
                let slot = &mut self.lanes[lane];
                slot.item.pos = slot.home;
                slot.item.visible = true;
                slot.spawned = true;
                self.countdown = cfg.period;
                events.push(BonusEvent::Spawned { lane });
                log::debug!("bonus spawned in lane {lane}");
            }
            if self.lanes.iter().all(|l| l.spawned) {
                for lane in &mut self.lanes {
                    lane.spawned = false;
                }
            }
        }

        for (i, lane) in self.lanes.iter_mut().enumerate() {
            if !lane.item.visible {
                continue;
            }
            lane.item.pos += lane.item.vel * cfg.fall_speed * dt;

            if lane.item.touches(paddle) {
                lane.reset();
                score += cfg.points;
                events.push(BonusEvent::Caught { lane: i });
                log::debug!("bonus caught in lane {i}");
            } else if lane.item.pos.y > playfield_bottom {
                lane.reset();
                events.push(BonusEvent::Missed { lane: i });
                log::debug!("bonus missed in lane {i}");
            }
        }

        (score, events)
    }
}
