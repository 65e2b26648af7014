//! Prelude module for convenient imports
//!
//! ```rust
//! use combat_core::prelude::*;
//! ```

// Entities
pub use crate::combatant::{Combatant, EnemyTemplate, Role};
pub use crate::equipment::{Armour, Item, RollRange, Weapon, WeaponKind};

// Combat
pub use crate::battle::{Battle, BattleReport, Outcome, RoundReport};
pub use crate::combat::{AttackMode, CombatError, PlayerAction, Side, TurnResult};

// Config
pub use crate::config::{default_catalog, load_catalog, Catalog, ConfigError};
