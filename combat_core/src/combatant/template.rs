//! EnemyTemplate - Catalogue entry that spawns enemy combatants

use super::Combatant;
use crate::config::{check_percent, ConfigError};
use crate::equipment::RollRange;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Number of members an enemy spawns with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GroupSize {
    Fixed(u32),
    /// Rolled once at spawn time
    Range(RollRange),
}

impl Default for GroupSize {
    fn default() -> Self {
        GroupSize::Fixed(1)
    }
}

impl GroupSize {
    fn min(&self) -> u32 {
        match self {
            GroupSize::Fixed(n) => *n,
            GroupSize::Range(range) => range.min(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyTemplate {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub group_size: GroupSize,
    pub hp_per_member: u32,
    pub agility: u32,
    pub damage: RollRange,
    #[serde(default)]
    pub crit_chance: u32,
    /// Innate sickness per member
    #[serde(default)]
    pub sickness: u32,
    #[serde(default)]
    pub inflict_sickness: RollRange,
}

impl EnemyTemplate {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.id.is_empty() {
            return Err(ConfigError::invalid(format!(
                "enemy '{}' has an empty id",
                self.name
            )));
        }
        if self.hp_per_member == 0 {
            return Err(ConfigError::invalid(format!(
                "{}: hp_per_member must be positive",
                self.name
            )));
        }
        if self.group_size.min() == 0 {
            return Err(ConfigError::invalid(format!(
                "{}: group_size must be at least 1",
                self.name
            )));
        }
        check_percent(&self.name, "agility", self.agility)?;
        check_percent(&self.name, "crit_chance", self.crit_chance)
    }

    /// Build a fresh enemy. A fixed size of 1 spawns a lone enemy,
    /// anything else spawns a group.
    pub fn spawn(&self, rng: &mut impl Rng) -> Result<Combatant, ConfigError> {
        let size = match self.group_size {
            GroupSize::Fixed(1) => None,
            GroupSize::Fixed(n) => Some(n),
            GroupSize::Range(range) => Some(range.roll(rng)),
        };

        let (enemy, members) = match size {
            None => (
                Combatant::solo(&self.name, self.hp_per_member, self.agility, self.damage)?,
                1,
            ),
            Some(n) => (
                Combatant::group(&self.name, n, self.hp_per_member, self.agility, self.damage)?,
                n,
            ),
        };

        Ok(enemy
            .with_crit_chance(self.crit_chance)?
            .with_inflict_sickness(self.inflict_sickness)
            .with_sickness(self.sickness.saturating_mul(members)))
    }
}
