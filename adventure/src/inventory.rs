//! Inventory - Weapons and armour the hero carries

use combat_core::{Armour, Item, Weapon};

#[derive(Debug, Clone)]
pub struct Inventory {
    weapons: Vec<Weapon>,
    armour: Vec<Armour>,
}

impl Inventory {
    /// Start with the gear the hero wakes up in
    pub fn new(weapon: Weapon, armour: Armour) -> Self {
        Inventory {
            weapons: vec![weapon],
            armour: vec![armour],
        }
    }

    /// Store an item. Returns false if one with the same id is already carried.
    pub fn pick_up(&mut self, item: Item) -> bool {
        match item {
            Item::Weapon(weapon) => {
                if self.weapons.iter().any(|w| w.id == weapon.id) {
                    return false;
                }
                self.weapons.push(weapon);
            }
            Item::Armour(armour) => {
                if self.armour.iter().any(|a| a.id == armour.id) {
                    return false;
                }
                self.armour.push(armour);
            }
        }
        true
    }

    pub fn weapons(&self) -> &[Weapon] {
        &self.weapons
    }

    pub fn armour(&self) -> &[Armour] {
        &self.armour
    }

    /// Weapon by its listing code
    pub fn weapon(&self, code: usize) -> Option<&Weapon> {
        self.weapons.get(code)
    }

    /// Armour by its listing code
    pub fn armour_piece(&self, code: usize) -> Option<&Armour> {
        self.armour.get(code)
    }

    /// One block of lines per weapon: code, name, first stat, then remaining stats
    pub fn weapon_listing(&self) -> Vec<String> {
        self.weapons
            .iter()
            .enumerate()
            .flat_map(|(code, w)| listing_rows(code, &w.name, &w.description, w.stat_lines()))
            .collect()
    }

    pub fn armour_listing(&self) -> Vec<String> {
        self.armour
            .iter()
            .enumerate()
            .flat_map(|(code, a)| listing_rows(code, &a.name, &a.description, a.stat_lines()))
            .collect()
    }
}

fn listing_rows(code: usize, name: &str, description: &str, stats: Vec<String>) -> Vec<String> {
    let mut stats = stats.into_iter();
    let first = stats.next().unwrap_or_default();
    let mut rows = vec![format!(
        "[{:^3}] {:<20} | {:<25} | {}",
        code, name, first, description
    )];
    rows.extend(stats.map(|stat| format!("{:<5} {:<20} | {:<25} |", "", "", stat)));
    rows
}
