//! Combatant - One side of a fight, hero or enemy
//!
//! A single record covers every participant. What differs between the hero,
//! a lone enemy and an enemy group lives in [`Role`]:
//! - the hero derives damage and crit from the equipped weapon and hp and
//!   agility from the armour, and mitigates incoming damage
//! - a group rolls once per surviving member and shrinks as its hp drops

mod group;
mod loadout;
mod template;

pub use group::GroupState;
pub use loadout::Loadout;
pub use template::{EnemyTemplate, GroupSize};

use crate::combat::constants::{CRIT_MULTIPLIER, PERCENT_DIE};
use crate::combat::{CombatError, DamageTaken};
use crate::config::{check_percent, ConfigError};
use crate::equipment::{Armour, RollRange, Weapon};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// What kind of participant a combatant is
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Role {
    Hero(Loadout),
    Solo,
    Group(GroupState),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combatant {
    pub name: String,
    hp: u32,
    hp_max: u32,
    agility: u32,
    damage: RollRange,
    crit_chance: u32,
    sickness: u32,
    inflict_sickness: RollRange,
    role: Role,
}

impl Combatant {
    /// Create the hero with a starting weapon and armour
    pub fn hero(name: impl Into<String>, weapon: Weapon, armour: Armour) -> Self {
        Combatant {
            name: name.into(),
            hp: armour.hp,
            hp_max: armour.hp,
            agility: armour.agility,
            damage: weapon.damage,
            crit_chance: weapon.crit_chance,
            sickness: 0,
            inflict_sickness: RollRange::ZERO,
            role: Role::Hero(Loadout::new(weapon, armour)),
        }
    }

    /// Create a single enemy
    pub fn solo(
        name: impl Into<String>,
        hp: u32,
        agility: u32,
        damage: RollRange,
    ) -> Result<Self, ConfigError> {
        Self::enemy(name.into(), hp, agility, damage, Role::Solo)
    }

    /// Create a group of `size` identical members sharing one hp pool
    pub fn group(
        name: impl Into<String>,
        size: u32,
        hp_per_member: u32,
        agility: u32,
        damage: RollRange,
    ) -> Result<Self, ConfigError> {
        let name = name.into();
        let group = GroupState::new(size, hp_per_member)
            .map_err(|e| ConfigError::invalid(format!("{}: {}", name, e)))?;
        let hp = hp_per_member.checked_mul(size).ok_or_else(|| {
            ConfigError::invalid(format!("{}: total group hp overflows", name))
        })?;
        Self::enemy(name, hp, agility, damage, Role::Group(group))
    }

    fn enemy(
        name: String,
        hp: u32,
        agility: u32,
        damage: RollRange,
        role: Role,
    ) -> Result<Self, ConfigError> {
        if hp == 0 {
            return Err(ConfigError::invalid(format!("{}: hp must be positive", name)));
        }
        check_percent(&name, "agility", agility)?;
        Ok(Combatant {
            name,
            hp,
            hp_max: hp,
            agility,
            damage,
            crit_chance: 0,
            sickness: 0,
            inflict_sickness: RollRange::ZERO,
            role,
        })
    }

    pub fn with_crit_chance(mut self, crit_chance: u32) -> Result<Self, ConfigError> {
        check_percent(&self.name, "crit_chance", crit_chance)?;
        self.crit_chance = crit_chance;
        Ok(self)
    }

    /// Sickness this combatant puts on targets it hits
    pub fn with_inflict_sickness(mut self, range: RollRange) -> Self {
        self.inflict_sickness = range;
        self
    }

    /// Starting sickness stacks
    pub fn with_sickness(mut self, sickness: u32) -> Self {
        self.sickness = sickness;
        self
    }

    // === Accessors ===

    pub fn hp(&self) -> u32 {
        self.hp
    }

    pub fn hp_max(&self) -> u32 {
        self.hp_max
    }

    pub fn agility(&self) -> u32 {
        self.agility
    }

    pub fn damage(&self) -> RollRange {
        self.damage
    }

    pub fn crit_chance(&self) -> u32 {
        self.crit_chance
    }

    pub fn sickness(&self) -> u32 {
        self.sickness
    }

    pub fn inflict_sickness(&self) -> RollRange {
        self.inflict_sickness
    }

    pub fn role(&self) -> &Role {
        &self.role
    }

    pub fn loadout(&self) -> Option<&Loadout> {
        match &self.role {
            Role::Hero(loadout) => Some(loadout),
            _ => None,
        }
    }

    pub fn group_state(&self) -> Option<&GroupState> {
        match &self.role {
            Role::Group(group) => Some(group),
            _ => None,
        }
    }

    pub fn is_hero(&self) -> bool {
        matches!(self.role, Role::Hero(_))
    }

    pub fn is_group(&self) -> bool {
        matches!(self.role, Role::Group(_))
    }

    pub fn is_defeated(&self) -> bool {
        self.hp == 0
    }

    pub fn is_defending(&self) -> bool {
        self.loadout().is_some_and(Loadout::is_defending)
    }

    /// Living members: the group's current size, otherwise 1 while alive
    pub fn group_size(&self) -> u32 {
        match &self.role {
            Role::Group(group) => group.current_size(),
            _ if self.is_defeated() => 0,
            _ => 1,
        }
    }

    // === Rolls ===

    /// Base damage; groups sum one roll per surviving member
    pub fn roll_damage(&self, rng: &mut impl Rng) -> u32 {
        match &self.role {
            Role::Group(group) => self.damage.roll_many(group.current_size(), rng),
            _ => self.damage.roll(rng),
        }
    }

    /// Sickness inflicted on a target; zero when the range is empty
    pub fn roll_inflict_sickness(&self, rng: &mut impl Rng) -> u32 {
        if self.inflict_sickness.is_zero() {
            return 0;
        }
        match &self.role {
            Role::Group(group) => self.inflict_sickness.roll_many(group.current_size(), rng),
            _ => self.inflict_sickness.roll(rng),
        }
    }

    /// Percentile roll against agility
    pub fn evade(&self, rng: &mut impl Rng) -> bool {
        rng.gen_range(1..=PERCENT_DIE) <= self.agility
    }

    /// Percentile roll against crit chance
    pub fn roll_crit(&self, rng: &mut impl Rng) -> bool {
        rng.gen_range(1..=PERCENT_DIE) <= self.crit_chance
    }

    /// Double `damage` on a successful crit roll
    pub fn apply_crit(&self, damage: u32, rng: &mut impl Rng) -> u32 {
        self.crit(damage, rng).0
    }

    /// Crit roll that also reports whether it landed
    pub(crate) fn crit(&self, damage: u32, rng: &mut impl Rng) -> (u32, bool) {
        if self.roll_crit(rng) {
            (damage.saturating_mul(CRIT_MULTIPLIER), true)
        } else {
            (damage, false)
        }
    }

    // === State changes ===

    /// Reduce hp, never below zero
    ///
    /// The hero mitigates through the loadout first; groups recount members.
    pub fn take_damage(&mut self, amount: u32) -> DamageTaken {
        let (dealt, defended) = match &self.role {
            Role::Hero(loadout) => (loadout.mitigate(amount), loadout.is_defending()),
            _ => (amount, false),
        };
        self.hp = self.hp.saturating_sub(dealt);
        if let Role::Group(group) = &mut self.role {
            group.recalculate(self.hp);
        }
        DamageTaken {
            raw: amount,
            dealt,
            defended,
            hp_after: self.hp,
        }
    }

    pub fn add_sickness(&mut self, amount: u32) {
        self.sickness = self.sickness.saturating_add(amount);
    }

    /// Take the accumulated sickness as damage right away
    pub fn apply_sickness(&mut self) -> Option<DamageTaken> {
        if self.sickness == 0 {
            return None;
        }
        Some(self.take_damage(self.sickness))
    }

    /// Swap weapons; damage and crit follow the weapon
    pub fn equip_weapon(&mut self, weapon: Weapon) -> Result<(), CombatError> {
        match &mut self.role {
            Role::Hero(loadout) => {
                self.damage = weapon.damage;
                self.crit_chance = weapon.crit_chance;
                loadout.weapon = weapon;
                Ok(())
            }
            _ => Err(CombatError::NotAHero(self.name.clone())),
        }
    }

    /// Swap armour; max hp and agility follow it and hp resets to full
    pub fn equip_armour(&mut self, armour: Armour) -> Result<(), CombatError> {
        match &mut self.role {
            Role::Hero(loadout) => {
                self.hp_max = armour.hp;
                self.hp = armour.hp;
                self.agility = armour.agility;
                loadout.armour = armour;
                Ok(())
            }
            _ => Err(CombatError::NotAHero(self.name.clone())),
        }
    }

    /// Raise or drop the hero's guard. Enemies have no stance.
    pub fn set_defending(&mut self, defending: bool) {
        if let Role::Hero(loadout) = &mut self.role {
            loadout.set_defending(defending);
        }
    }

    /// Back to full hp with the guard down. Sickness stacks are kept.
    pub fn restore(&mut self) {
        self.hp = self.hp_max;
        self.set_defending(false);
        if let Role::Group(group) = &mut self.role {
            group.recalculate(self.hp);
        }
    }
}
