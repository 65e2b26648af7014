//! TurnResult - Outcome of a single combat action

use serde::{Deserialize, Serialize};

/// What happened during one action, plus the target's state afterwards
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnResult {
    /// Who acted
    pub actor: String,
    /// Who was on the receiving end
    pub target: String,

    // === Rolls ===
    /// The target evaded; nothing else happened
    pub evaded: bool,
    /// The strike was a critical hit
    pub critical: bool,
    /// Strike damage after crit, before the target's mitigation
    pub rolled_damage: u32,

    // === Effects ===
    /// Hp removed by the strike itself
    pub damage_dealt: u32,
    /// Sickness stacks added to the target
    pub sickness_inflicted: u32,
    /// Hp removed by the target's accumulated sickness
    pub sickness_damage: u32,
    /// The actor took a defensive stance instead of attacking
    pub defending: bool,
    /// The target's stance halved incoming damage
    pub target_defended: bool,

    // === Target state ===
    pub target_hp: u32,
    pub target_group_size: u32,
    /// The target reached 0 hp
    pub defeated: bool,

    /// Player-facing narration, in order
    pub messages: Vec<String>,
}

impl TurnResult {
    pub fn new(actor: impl Into<String>, target: impl Into<String>) -> Self {
        TurnResult {
            actor: actor.into(),
            target: target.into(),
            ..Default::default()
        }
    }

    pub fn log(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    /// Hp the target lost this action
    pub fn total_damage(&self) -> u32 {
        self.damage_dealt.saturating_add(self.sickness_damage)
    }

    /// One-line summary
    pub fn summary(&self) -> String {
        if self.defending {
            return format!("{} defends", self.actor);
        }
        if self.evaded {
            return format!("{} evaded {}", self.target, self.actor);
        }

        let mut parts = Vec::new();
        if self.damage_dealt > 0 {
            parts.push(format!("{} damage", self.damage_dealt));
        }
        if self.critical {
            parts.push("critical".to_string());
        }
        if self.sickness_inflicted > 0 {
            parts.push(format!("+{} sickness", self.sickness_inflicted));
        }
        if self.sickness_damage > 0 {
            parts.push(format!("{} sickness damage", self.sickness_damage));
        }
        if self.defeated {
            parts.push("DEFEATED".to_string());
        }

        if parts.is_empty() {
            format!("{} -> {}: no damage", self.actor, self.target)
        } else {
            format!("{} -> {}: {}", self.actor, self.target, parts.join(", "))
        }
    }
}

/// Hp change from one `take_damage` call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageTaken {
    /// Incoming amount before mitigation
    pub raw: u32,
    /// Amount removed from hp (before the floor at 0)
    pub dealt: u32,
    /// Halved by a defensive stance
    pub defended: bool,
    pub hp_after: u32,
}

impl DamageTaken {
    pub fn mitigated(&self) -> u32 {
        self.raw.saturating_sub(self.dealt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_miss() {
        let mut result = TurnResult::new("Wolf", "Ayla");
        result.evaded = true;
        assert_eq!(result.summary(), "Ayla evaded Wolf");
    }

    #[test]
    fn test_summary_hit() {
        let mut result = TurnResult::new("Ayla", "Wolf");
        result.damage_dealt = 24;
        result.critical = true;
        result.defeated = true;
        assert_eq!(result.summary(), "Ayla -> Wolf: 24 damage, critical, DEFEATED");
    }

    #[test]
    fn test_total_damage() {
        let mut result = TurnResult::new("Ayla", "Snakes");
        result.damage_dealt = 10;
        result.sickness_damage = 15;
        assert_eq!(result.total_damage(), 25);
    }

    #[test]
    fn test_mitigated() {
        let taken = DamageTaken {
            raw: 100,
            dealt: 25,
            defended: true,
            hp_after: 975,
        };
        assert_eq!(taken.mitigated(), 75);
    }

    #[test]
    fn test_serializes_to_json() {
        let mut result = TurnResult::new("Ayla", "Wolf");
        result.log("Ayla uses Fists for 4 damage!");
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"actor\":\"Ayla\""));
        assert!(json.contains("Fists for 4 damage"));
    }
}
