//! Equipment - Weapons and armour the hero can carry and equip

mod armour;
mod range;
mod weapon;

pub use armour::Armour;
pub use range::RollRange;
pub use weapon::{Weapon, WeaponKind};

/// Anything that can be found in the world and picked up
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Weapon(Weapon),
    Armour(Armour),
}

impl Item {
    pub fn id(&self) -> &str {
        match self {
            Item::Weapon(w) => &w.id,
            Item::Armour(a) => &a.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Item::Weapon(w) => &w.name,
            Item::Armour(a) => &a.name,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Item::Weapon(w) => &w.description,
            Item::Armour(a) => &a.description,
        }
    }
}

impl From<Weapon> for Item {
    fn from(weapon: Weapon) -> Self {
        Item::Weapon(weapon)
    }
}

impl From<Armour> for Item {
    fn from(armour: Armour) -> Self {
        Item::Armour(armour)
    }
}
