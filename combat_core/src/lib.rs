//! combat_core - Turn-based combat for the stone age text adventure
//!
//! This library provides:
//! - Equipment: weapons (standard, special, area) and armour
//! - Combatant: the hero, lone enemies and enemy groups
//! - Combat resolution: evasion, crits, mitigation and sickness
//! - Battle: turn order and outcome for one fight
//! - Catalog: item and enemy data loaded from TOML

pub mod battle;
pub mod combat;
pub mod combatant;
pub mod config;
pub mod equipment;

// Re-export core types for convenience
pub use battle::{Battle, BattleReport, Outcome, RoundReport};
pub use combat::{AttackMode, CombatError, DamageTaken, PlayerAction, Side, TurnResult};
pub use combatant::{Combatant, EnemyTemplate, GroupSize, GroupState, Loadout, Role};
pub use config::{default_catalog, Catalog, ConfigError};
pub use equipment::{Armour, Item, RollRange, Weapon, WeaponKind};

pub mod prelude;
