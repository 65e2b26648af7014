//! Weapon definitions

use super::RollRange;
use crate::config::{check_percent, ConfigError};
use serde::{Deserialize, Serialize};

/// How a weapon attacks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WeaponKind {
    /// Base damage roll only
    #[default]
    Standard,
    /// Adds a second attack with its own range, optionally inflicting sickness
    Special {
        special: RollRange,
        #[serde(default)]
        inflict_sickness: RollRange,
    },
    /// Base damage multiplied by the target's current group size
    Aoe,
}

/// An equippable weapon. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    pub id: String,
    pub name: String,
    pub description: String,
    pub damage: RollRange,
    /// Percent chance (0-100) to double damage
    #[serde(default)]
    pub crit_chance: u32,
    #[serde(default)]
    pub kind: WeaponKind,
}

impl Weapon {
    /// Create a standard weapon with no crit chance
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        damage: RollRange,
    ) -> Self {
        Weapon {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            damage,
            crit_chance: 0,
            kind: WeaponKind::Standard,
        }
    }

    /// Set crit chance, rejecting values above 100
    pub fn with_crit_chance(mut self, crit_chance: u32) -> Result<Self, ConfigError> {
        check_percent(&self.name, "crit_chance", crit_chance)?;
        self.crit_chance = crit_chance;
        Ok(self)
    }

    pub fn with_kind(mut self, kind: WeaponKind) -> Self {
        self.kind = kind;
        self
    }

    /// Check invariants for a weapon built through deserialization
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.id.is_empty() {
            return Err(ConfigError::invalid(format!(
                "weapon '{}' has an empty id",
                self.name
            )));
        }
        check_percent(&self.name, "crit_chance", self.crit_chance)
    }

    pub fn is_special(&self) -> bool {
        matches!(self.kind, WeaponKind::Special { .. })
    }

    pub fn is_aoe(&self) -> bool {
        matches!(self.kind, WeaponKind::Aoe)
    }

    /// Display lines for inventory and status panels
    pub fn stat_lines(&self) -> Vec<String> {
        let mut lines = vec![format!("Damage: {}", self.damage)];
        if let WeaponKind::Special { special, .. } = &self.kind {
            lines.push(format!("Special: {}", special));
        }
        lines.push(format!("Crit Chance: {}%", self.crit_chance));
        match &self.kind {
            WeaponKind::Special {
                inflict_sickness, ..
            } if !inflict_sickness.is_zero() => {
                lines.push(format!("Sickness: {}", inflict_sickness));
            }
            WeaponKind::Aoe => lines.push("Hits every member of a group".to_string()),
            _ => {}
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dagger() -> Weapon {
        Weapon::new(
            "poisoned_dagger",
            "Poisoned Dagger",
            "A dagger coated with a deadly poison",
            RollRange::new(20, 40).unwrap(),
        )
        .with_kind(WeaponKind::Special {
            special: RollRange::new(10, 25).unwrap(),
            inflict_sickness: RollRange::new(5, 20).unwrap(),
        })
    }

    #[test]
    fn test_crit_chance_bounds() {
        let base = Weapon::new("dagger", "Dagger", "", RollRange::fixed(20));
        assert!(base.clone().with_crit_chance(100).is_ok());
        assert!(base.with_crit_chance(101).is_err());
    }

    #[test]
    fn test_kind_queries() {
        let weapon = dagger();
        assert!(weapon.is_special());
        assert!(!weapon.is_aoe());

        let brambles = Weapon::new("brambles", "Brambles", "", RollRange::fixed(5))
            .with_kind(WeaponKind::Aoe);
        assert!(brambles.is_aoe());
    }

    #[test]
    fn test_stat_lines() {
        let lines = dagger().stat_lines();
        assert_eq!(lines[0], "Damage: 20 - 40");
        assert!(lines.contains(&"Special: 10 - 25".to_string()));
        assert!(lines.contains(&"Sickness: 5 - 20".to_string()));
    }

    #[test]
    fn test_deserialize_kinds() {
        let standard: Weapon = toml::from_str(
            r#"
            id = "bone"
            name = "Bone"
            description = "From the carcass of an unknown creature"
            damage = [10, 24]
            "#,
        )
        .unwrap();
        assert_eq!(standard.kind, WeaponKind::Standard);
        assert_eq!(standard.crit_chance, 0);

        let special: Weapon = toml::from_str(
            r#"
            id = "hand_of_god"
            name = "Hand of God"
            description = ""
            damage = [1000, 2000]
            kind = { type = "special", special = [10, 20000] }
            "#,
        )
        .unwrap();
        match special.kind {
            WeaponKind::Special {
                special,
                inflict_sickness,
            } => {
                assert_eq!(special.max(), 20000);
                assert!(inflict_sickness.is_zero());
            }
            other => panic!("expected special weapon, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_high_crit() {
        let mut weapon = dagger();
        weapon.crit_chance = 150;
        assert!(weapon.validate().is_err());
    }
}
