//! Destructible block rows
//!
//! Both rows live in one ordered collection; each block is tagged with the
//! row it belongs to so the renderer can pick its sprite.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::ball::ContactState;
use super::entity::Entity;
use crate::config::BlockConfig;

/// Which of the two rows a block belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockRow {
    /// Top row
    Blue,
    /// Second row, directly beneath the first
    Green,
}

impl BlockRow {
    pub const ALL: [BlockRow; 2] = [BlockRow::Blue, BlockRow::Green];
}

/// A single block slot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub id: u32,
    pub row: BlockRow,
    pub entity: Entity,
    pub destroyed: bool,
    pub contact: ContactState,
}

/// Both block rows plus the remaining-block count used for win detection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockField {
    blocks: Vec<Block>,
    remaining: usize,
}

impl BlockField {
    /// Lay out two rows of `columns` blocks, left to right, starting at x=0
    pub fn new(cfg: &BlockConfig) -> Self {
        let size = Vec2::new(cfg.width, cfg.height);
        let mut blocks = Vec::with_capacity(cfg.columns * BlockRow::ALL.len());
        for (r, row) in BlockRow::ALL.iter().enumerate() {
            let y = cfg.top + r as f32 * cfg.height;
            for c in 0..cfg.columns {
                let pos = Vec2::new(c as f32 * cfg.width, y);
                blocks.push(Block {
                    id: blocks.len() as u32,
                    row: *row,
                    entity: Entity::new(pos, size),
                    destroyed: false,
                    contact: ContactState::Free,
                });
            }
        }
        let remaining = blocks.len();
        Self { blocks, remaining }
    }

    pub fn remaining(&self) -> usize {
        self.remaining
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Block> {
        self.blocks.iter_mut()
    }

    /// Blocks that still take part in collisions
    pub fn standing(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter().filter(|b| !b.destroyed)
    }

    pub fn get(&self, id: u32) -> Option<&Block> {
        self.blocks.get(id as usize)
    }

    /// Hide a block and count it off. Returns false if it was already destroyed.
    pub fn destroy(&mut self, id: u32) -> bool {
        match self.blocks.get_mut(id as usize) {
            Some(block) if !block.destroyed => {
                block.destroyed = true;
                block.entity.hide();
                block.contact = ContactState::Free;
                self.remaining -= 1;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let field = BlockField::new(&BlockConfig::default());
        assert_eq!(field.len(), 20);
        assert_eq!(field.remaining(), 20);

        let blue: Vec<_> = field.iter().filter(|b| b.row == BlockRow::Blue).collect();
        let green: Vec<_> = field.iter().filter(|b| b.row == BlockRow::Green).collect();
        assert_eq!(blue.len(), 10);
        assert_eq!(green.len(), 10);
        assert_eq!(blue[0].entity.pos, Vec2::new(0.0, 100.0));
        assert_eq!(blue[9].entity.pos, Vec2::new(576.0, 100.0));
        assert_eq!(green[0].entity.pos, Vec2::new(0.0, 132.0));
        assert!(field.iter().all(|b| b.entity.visible));
    }

    #[test]
    fn test_destroy_counts_once() {
        let mut field = BlockField::new(&BlockConfig::default());
        assert!(field.destroy(3));
        assert!(!field.destroy(3));
        assert_eq!(field.remaining(), 19);
        let block = field.get(3).unwrap();
        assert!(block.destroyed);
        assert!(!block.entity.visible);
        assert_eq!(field.standing().count(), 19);
    }

    #[test]
    fn test_destroy_unknown_id() {
        let mut field = BlockField::new(&BlockConfig::default());
        assert!(!field.destroy(99));
        assert_eq!(field.remaining(), 20);
    }

    #[test]
    fn test_remaining_matches_standing() {
        let mut field = BlockField::new(&BlockConfig::default());
        for id in (0..20).step_by(3) {
            field.destroy(id);
        }
        assert_eq!(field.remaining(), field.standing().count());
    }
}
