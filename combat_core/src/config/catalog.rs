//! Catalog - Weapons, armour and enemy templates loaded from TOML

use super::ConfigError;
use crate::combatant::EnemyTemplate;
use crate::equipment::{Armour, Item, Weapon};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct WeaponsConfig {
    #[serde(default)]
    weapons: Vec<Weapon>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ArmourConfig {
    #[serde(default)]
    armour: Vec<Armour>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct EnemiesConfig {
    #[serde(default)]
    enemies: Vec<EnemyTemplate>,
}

/// Every item and enemy the world can reference, keyed by id
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    weapons: HashMap<String, Weapon>,
    armour: HashMap<String, Armour>,
    enemies: HashMap<String, EnemyTemplate>,
}

impl Catalog {
    /// Validate every entry and index by id. Ids are unique across items.
    pub fn from_parts(
        weapons: Vec<Weapon>,
        armour: Vec<Armour>,
        enemies: Vec<EnemyTemplate>,
    ) -> Result<Self, ConfigError> {
        let mut catalog = Catalog::default();

        for weapon in weapons {
            weapon.validate()?;
            catalog.ensure_new_item(&weapon.id)?;
            catalog.weapons.insert(weapon.id.clone(), weapon);
        }
        for piece in armour {
            piece.validate()?;
            catalog.ensure_new_item(&piece.id)?;
            catalog.armour.insert(piece.id.clone(), piece);
        }
        for enemy in enemies {
            enemy.validate()?;
            if catalog.enemies.contains_key(&enemy.id) {
                return Err(ConfigError::invalid(format!(
                    "duplicate enemy id '{}'",
                    enemy.id
                )));
            }
            catalog.enemies.insert(enemy.id.clone(), enemy);
        }

        Ok(catalog)
    }

    fn ensure_new_item(&self, id: &str) -> Result<(), ConfigError> {
        if self.weapons.contains_key(id) || self.armour.contains_key(id) {
            return Err(ConfigError::invalid(format!("duplicate item id '{}'", id)));
        }
        Ok(())
    }

    pub fn weapon(&self, id: &str) -> Result<&Weapon, ConfigError> {
        self.weapons
            .get(id)
            .ok_or_else(|| ConfigError::invalid(format!("unknown weapon '{}'", id)))
    }

    pub fn armour(&self, id: &str) -> Result<&Armour, ConfigError> {
        self.armour
            .get(id)
            .ok_or_else(|| ConfigError::invalid(format!("unknown armour '{}'", id)))
    }

    pub fn enemy(&self, id: &str) -> Result<&EnemyTemplate, ConfigError> {
        self.enemies
            .get(id)
            .ok_or_else(|| ConfigError::invalid(format!("unknown enemy '{}'", id)))
    }

    /// Look an id up among weapons, then armour
    pub fn item(&self, id: &str) -> Result<Item, ConfigError> {
        if let Some(weapon) = self.weapons.get(id) {
            return Ok(Item::Weapon(weapon.clone()));
        }
        if let Some(armour) = self.armour.get(id) {
            return Ok(Item::Armour(armour.clone()));
        }
        Err(ConfigError::invalid(format!("unknown item '{}'", id)))
    }

    pub fn weapon_count(&self) -> usize {
        self.weapons.len()
    }

    pub fn armour_count(&self) -> usize {
        self.armour.len()
    }

    pub fn enemy_count(&self) -> usize {
        self.enemies.len()
    }
}

/// Build a catalog from the contents of the three TOML files
pub fn parse_catalog(weapons: &str, armour: &str, enemies: &str) -> Result<Catalog, ConfigError> {
    let weapons: WeaponsConfig = super::parse_toml(weapons)?;
    let armour: ArmourConfig = super::parse_toml(armour)?;
    let enemies: EnemiesConfig = super::parse_toml(enemies)?;
    Catalog::from_parts(weapons.weapons, armour.armour, enemies.enemies)
}

/// Load `weapons.toml`, `armour.toml` and `enemies.toml` from a directory
pub fn load_catalog(dir: &Path) -> Result<Catalog, ConfigError> {
    let weapons: WeaponsConfig = super::load_toml(&dir.join("weapons.toml"))?;
    let armour: ArmourConfig = super::load_toml(&dir.join("armour.toml"))?;
    let enemies: EnemiesConfig = super::load_toml(&dir.join("enemies.toml"))?;
    Catalog::from_parts(weapons.weapons, armour.armour, enemies.enemies)
}

/// The catalog shipped with the crate
pub fn default_catalog() -> Result<Catalog, ConfigError> {
    parse_catalog(
        include_str!("../../config/weapons.toml"),
        include_str!("../../config/armour.toml"),
        include_str!("../../config/enemies.toml"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equipment::WeaponKind;

    #[test]
    fn test_default_catalog_loads() {
        let catalog = default_catalog().unwrap();
        assert_eq!(catalog.weapon_count(), 19);
        assert_eq!(catalog.armour_count(), 13);
        assert_eq!(catalog.enemy_count(), 16);

        let fists = catalog.weapon("fists").unwrap();
        assert_eq!(fists.damage.min(), 2);
        assert_eq!(fists.damage.max(), 5);

        let clothing = catalog.armour("clothing").unwrap();
        assert_eq!(clothing.hp, 25);
        assert_eq!(clothing.agility, 20);
    }

    #[test]
    fn test_default_catalog_kinds() {
        let catalog = default_catalog().unwrap();
        assert!(catalog.weapon("brambles").unwrap().is_aoe());
        match catalog.weapon("poisoned_dagger").unwrap().kind {
            WeaponKind::Special {
                inflict_sickness, ..
            } => assert_eq!(inflict_sickness.max(), 20),
            other => panic!("expected special weapon, got {:?}", other),
        }
    }

    #[test]
    fn test_item_lookup() {
        let catalog = default_catalog().unwrap();
        assert!(matches!(catalog.item("bone"), Ok(Item::Weapon(_))));
        assert!(matches!(catalog.item("fur_coat"), Ok(Item::Armour(_))));
        assert!(matches!(
            catalog.item("lightsaber"),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_rejects_invalid_weapon() {
        let weapons = r#"
[[weapons]]
id = "broken"
name = "Broken"
description = ""
damage = [10, 5]
"#;
        assert!(parse_catalog(weapons, "", "").is_err());

        let weapons = r#"
[[weapons]]
id = "lucky"
name = "Lucky"
description = ""
damage = [1, 5]
crit_chance = 101
"#;
        assert!(matches!(
            parse_catalog(weapons, "", ""),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_rejects_bad_reduction() {
        let armour = r#"
[[armour]]
id = "glass"
name = "Glass"
description = ""
hp = 10
agility = 0
damage_reduction = 1.0
"#;
        assert!(matches!(
            parse_catalog("", armour, ""),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let weapons = r#"
[[weapons]]
id = "bone"
name = "Bone"
description = ""
damage = [1, 2]

[[weapons]]
id = "bone"
name = "Other Bone"
description = ""
damage = [1, 2]
"#;
        assert!(parse_catalog(weapons, "", "").is_err());
    }

    #[test]
    fn test_every_enemy_spawns() {
        use rand::rngs::StdRng;
        use rand::SeedableRng;

        let catalog = default_catalog().unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        for id in ["wolf", "wolf_pack", "snakes", "tribe", "cave_bear", "mictlantecuhtli"] {
            let enemy = catalog.enemy(id).unwrap().spawn(&mut rng).unwrap();
            assert!(enemy.hp() > 0);
        }
    }
}
