//! Combat resolution - Resolve one attack or defensive action at a time

mod action;
mod resolution;
mod result;

pub use action::{AttackMode, PlayerAction};
pub use resolution::{
    resolve_attack, resolve_attack_with_rng, resolve_defend, resolve_enemy_action,
    resolve_enemy_action_with_rng, resolve_player_action, resolve_player_action_with_rng,
};
pub use result::{DamageTaken, TurnResult};

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Combat constants
pub mod constants {
    /// Sides of the percentile die used for evasion and crit rolls
    pub const PERCENT_DIE: u32 = 100;
    /// Damage multiplier on a critical hit
    pub const CRIT_MULTIPLIER: u32 = 2;
    /// Incoming damage is divided by this while defending
    pub const DEFEND_DIVISOR: f64 = 2.0;
}

/// Which side of a battle acts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Player,
    Enemy,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Player => write!(f, "player"),
            Side::Enemy => write!(f, "enemy"),
        }
    }
}

/// Rejected combat actions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CombatError {
    #[error("The battle is already over")]
    BattleOver,
    #[error("It is not the {0}'s turn")]
    OutOfTurn(Side),
    #[error("{0} has been defeated and cannot act")]
    Defeated(String),
    #[error("{0} has already been defeated")]
    TargetDefeated(String),
    #[error("{0} has no loadout to act with")]
    NotAHero(String),
}
