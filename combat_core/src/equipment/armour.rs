//! Armour definitions

use crate::config::{check_percent, ConfigError};
use serde::{Deserialize, Serialize};

/// An equippable armour piece. Sets the wearer's hp, agility and damage reduction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Armour {
    pub id: String,
    pub name: String,
    pub description: String,
    pub hp: u32,
    /// Evasion percentage (0-100)
    pub agility: u32,
    /// Fraction of incoming damage removed, in `[0, 1)`
    pub damage_reduction: f64,
}

impl Armour {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        hp: u32,
        agility: u32,
        damage_reduction: f64,
    ) -> Result<Self, ConfigError> {
        let armour = Armour {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            hp,
            agility,
            damage_reduction,
        };
        armour.validate()?;
        Ok(armour)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.id.is_empty() {
            return Err(ConfigError::invalid(format!(
                "armour '{}' has an empty id",
                self.name
            )));
        }
        check_percent(&self.name, "agility", self.agility)?;
        if !(0.0..1.0).contains(&self.damage_reduction) {
            return Err(ConfigError::invalid(format!(
                "{}: damage_reduction must be in [0, 1), got {}",
                self.name, self.damage_reduction
            )));
        }
        Ok(())
    }

    /// Damage reduction as a whole percentage, truncated
    pub fn reduction_percent(&self) -> u32 {
        (self.damage_reduction * 100.0) as u32
    }

    pub fn stat_lines(&self) -> Vec<String> {
        vec![
            format!("HP: {}", self.hp),
            format!("Agility: {}", self.agility),
            format!("Damage Reduction: {}%", self.reduction_percent()),
        ]
    }
}
