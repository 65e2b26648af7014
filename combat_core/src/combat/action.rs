//! Actions the player can choose on their turn

use serde::{Deserialize, Serialize};

/// Which attack of the equipped weapon to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AttackMode {
    #[default]
    Basic,
    /// Only special weapons have one; others fall back to their basic attack
    Special,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerAction {
    Attack(AttackMode),
    /// Halve the next incoming hit
    Defend,
}

impl PlayerAction {
    pub fn attack() -> Self {
        PlayerAction::Attack(AttackMode::Basic)
    }

    pub fn special() -> Self {
        PlayerAction::Attack(AttackMode::Special)
    }
}
