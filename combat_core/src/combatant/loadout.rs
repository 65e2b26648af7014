//! Loadout - The hero's equipped weapon and armour plus defensive stance

use crate::combat::constants::DEFEND_DIVISOR;
use crate::equipment::{Armour, Weapon};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loadout {
    pub weapon: Weapon,
    pub armour: Armour,
    defending: bool,
}

impl Loadout {
    pub fn new(weapon: Weapon, armour: Armour) -> Self {
        Loadout {
            weapon,
            armour,
            defending: false,
        }
    }

    pub fn is_defending(&self) -> bool {
        self.defending
    }

    pub(crate) fn set_defending(&mut self, defending: bool) {
        self.defending = defending;
    }

    /// Incoming damage after stance and armour
    ///
    /// Order: halve when defending, scale by `1 - damage_reduction`, truncate.
    pub fn mitigate(&self, amount: u32) -> u32 {
        let mut damage = f64::from(amount);
        if self.defending {
            damage /= DEFEND_DIVISOR;
        }
        (damage * (1.0 - self.armour.damage_reduction)) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equipment::RollRange;

    fn loadout(reduction: f64) -> Loadout {
        Loadout::new(
            Weapon::new("fists", "Fists", "", RollRange::new(2, 5).unwrap()),
            Armour::new("test", "Test", "", 1000, 0, reduction).unwrap(),
        )
    }

    #[test]
    fn test_defend_and_reduction() {
        let mut l = loadout(0.5);
        l.set_defending(true);
        assert_eq!(l.mitigate(100), 25);
    }

    #[test]
    fn test_no_mitigation() {
        let l = loadout(0.0);
        assert_eq!(l.mitigate(50), 50);
    }

    #[test]
    fn test_truncates() {
        let mut l = loadout(0.0);
        l.set_defending(true);
        assert_eq!(l.mitigate(7), 3);

        let l = loadout(0.2);
        assert_eq!(l.mitigate(9), 7);
    }
}
