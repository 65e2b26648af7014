//! Group bookkeeping for enemies that represent several identical members

use crate::config::ConfigError;
use serde::{Deserialize, Serialize};

/// Size tracking for a group collapsed into a single hp pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupState {
    hp_per_member: u32,
    original_size: u32,
    current_size: u32,
}

impl GroupState {
    pub fn new(size: u32, hp_per_member: u32) -> Result<Self, ConfigError> {
        if size == 0 {
            return Err(ConfigError::invalid("group size must be at least 1"));
        }
        if hp_per_member == 0 {
            return Err(ConfigError::invalid("hp_per_member must be at least 1"));
        }
        Ok(GroupState {
            hp_per_member,
            original_size: size,
            current_size: size,
        })
    }

    /// Members still standing for a given pool of hp
    ///
    /// Any positive hp keeps at least one member alive.
    pub fn size_for(hp: u32, hp_per_member: u32) -> u32 {
        if hp == 0 {
            0
        } else {
            (hp / hp_per_member.max(1)).max(1)
        }
    }

    pub fn recalculate(&mut self, hp: u32) {
        self.current_size = Self::size_for(hp, self.hp_per_member);
    }

    pub fn hp_per_member(&self) -> u32 {
        self.hp_per_member
    }

    pub fn original_size(&self) -> u32 {
        self.original_size
    }

    pub fn current_size(&self) -> u32 {
        self.current_size
    }
}
