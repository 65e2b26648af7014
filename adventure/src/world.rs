//! World - Areas grouped into regions and linked by named exits

use combat_core::config::{load_toml, parse_toml};
use combat_core::{Catalog, Combatant, ConfigError, Item};
use rand::Rng;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Deserialize)]
pub struct WorldConfig {
    pub start: String,
    /// Completing this area wins the game
    pub finale: String,
    pub regions: Vec<RegionConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegionConfig {
    pub name: String,
    #[serde(default)]
    pub areas: Vec<AreaConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AreaConfig {
    pub name: String,
    pub description: String,
    /// Weapon or armour id
    #[serde(default)]
    pub item: Option<String>,
    /// Enemy template id
    #[serde(default)]
    pub enemy: Option<String>,
    #[serde(default)]
    pub exits: Vec<Exit>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Exit {
    pub action: String,
    pub to: String,
}

/// A single location
#[derive(Debug, Clone)]
pub struct Area {
    pub name: String,
    pub region: String,
    pub description: String,
    pub item: Option<Item>,
    /// Owned here until encountered, then moved into the battle
    pub enemy: Option<Combatant>,
    pub exits: Vec<Exit>,
}

impl Area {
    /// Nothing left to pick up or fight
    pub fn is_complete(&self) -> bool {
        self.item.is_none() && self.enemy.is_none()
    }

    pub fn exit(&self, action: &str) -> Option<&Exit> {
        self.exits.iter().find(|e| e.action == action)
    }
}

#[derive(Debug, Clone)]
pub struct Region {
    pub name: String,
    pub areas: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct World {
    areas: HashMap<String, Area>,
    regions: Vec<Region>,
    start: String,
    finale: String,
}

impl World {
    /// Resolve item and enemy ids against the catalog and spawn one enemy per area
    pub fn from_config(
        config: WorldConfig,
        catalog: &Catalog,
        rng: &mut impl Rng,
    ) -> Result<Self, ConfigError> {
        let mut areas = HashMap::new();
        let mut regions = Vec::new();

        for region in config.regions {
            let mut names = Vec::new();
            for area in region.areas {
                if areas.contains_key(&area.name) {
                    return Err(ConfigError::ValidationError(format!(
                        "duplicate area '{}'",
                        area.name
                    )));
                }
                let item = area.item.as_deref().map(|id| catalog.item(id)).transpose()?;
                let enemy = match area.enemy.as_deref() {
                    Some(id) => Some(catalog.enemy(id)?.spawn(rng)?),
                    None => None,
                };
                names.push(area.name.clone());
                areas.insert(
                    area.name.clone(),
                    Area {
                        name: area.name,
                        region: region.name.clone(),
                        description: area.description,
                        item,
                        enemy,
                        exits: area.exits,
                    },
                );
            }
            regions.push(Region {
                name: region.name,
                areas: names,
            });
        }

        let world = World {
            areas,
            regions,
            start: config.start,
            finale: config.finale,
        };
        world.validate()?;
        debug!(areas = world.areas.len(), regions = world.regions.len(), "world built");
        Ok(world)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for required in [&self.start, &self.finale] {
            if !self.areas.contains_key(required) {
                return Err(ConfigError::ValidationError(format!(
                    "unknown area '{}'",
                    required
                )));
            }
        }
        for area in self.areas.values() {
            for exit in &area.exits {
                if !self.areas.contains_key(&exit.to) {
                    return Err(ConfigError::ValidationError(format!(
                        "{}: exit '{}' leads to unknown area '{}'",
                        area.name, exit.action, exit.to
                    )));
                }
            }
        }
        Ok(())
    }

    /// Parse a world from TOML text
    pub fn parse(content: &str, catalog: &Catalog, rng: &mut impl Rng) -> Result<Self, ConfigError> {
        let config: WorldConfig = parse_toml(content)?;
        Self::from_config(config, catalog, rng)
    }

    /// Load a world from a TOML file
    pub fn load(path: &Path, catalog: &Catalog, rng: &mut impl Rng) -> Result<Self, ConfigError> {
        let config: WorldConfig = load_toml(path)?;
        Self::from_config(config, catalog, rng)
    }

    /// The map shipped with the game
    pub fn default_world(catalog: &Catalog, rng: &mut impl Rng) -> Result<Self, ConfigError> {
        Self::parse(include_str!("../config/world.toml"), catalog, rng)
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    /// Cleared and total areas of a region
    pub fn region_progress(&self, region: &str) -> Option<(usize, usize)> {
        let region = self.regions.iter().find(|r| r.name == region)?;
        let cleared = region
            .areas
            .iter()
            .filter_map(|name| self.area(name))
            .filter(|area| area.is_complete())
            .count();
        Some((cleared, region.areas.len()))
    }

    pub fn area_count(&self) -> usize {
        self.areas.len()
    }

    pub fn area(&self, name: &str) -> Option<&Area> {
        self.areas.get(name)
    }

    pub fn area_mut(&mut self, name: &str) -> Option<&mut Area> {
        self.areas.get_mut(name)
    }

    /// Follow an exit out of `from`
    pub fn travel(&self, from: &str, action: &str) -> Option<&Area> {
        let exit = self.area(from)?.exit(action)?;
        self.area(&exit.to)
    }

    /// Areas with nothing left to take or fight
    pub fn cleared_count(&self) -> usize {
        self.areas.values().filter(|area| area.is_complete()).count()
    }

    pub fn is_won(&self) -> bool {
        self.area(&self.finale).is_some_and(Area::is_complete)
    }
}
