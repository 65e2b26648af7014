//! Attack resolution
//!
//! Every attack follows the same sequence:
//! 1. The target tries to evade; an evaded attack changes nothing
//! 2. Damage is rolled (base, special or area) and a single crit roll may double it
//! 3. An attacker with an innate sickness range infects the target instead of
//!    dealing the rolled damage, and the target's sickness hits immediately
//! 4. Otherwise the rolled damage goes through the target's `take_damage`
//!
//! The hero's weapon picks the roll. A special weapon's special attack deals
//! its special damage and then infects with the weapon's own sickness range.

use super::result::{DamageTaken, TurnResult};
use super::{AttackMode, CombatError, PlayerAction};
use crate::combatant::Combatant;
use crate::equipment::{RollRange, WeaponKind};
use rand::Rng;
use tracing::debug;

/// Resolve a plain attack from `attacker` on `target`
pub fn resolve_attack(
    attacker: &Combatant,
    target: &mut Combatant,
) -> Result<TurnResult, CombatError> {
    let mut rng = rand::thread_rng();
    resolve_attack_with_rng(attacker, target, &mut rng)
}

/// Resolve a plain attack with a provided RNG (for deterministic testing)
pub fn resolve_attack_with_rng(
    attacker: &Combatant,
    target: &mut Combatant,
    rng: &mut impl Rng,
) -> Result<TurnResult, CombatError> {
    ensure_can_act(attacker, target)?;
    let mut result = TurnResult::new(&attacker.name, &target.name);

    if target.evade(rng) {
        return Ok(miss(result, target));
    }

    let damage = roll_strike(attacker, target, Roll::Base, rng, &mut result);
    let label = attacker_label(attacker);

    if attacker.inflict_sickness().is_zero() {
        result.log(format!(
            "{} attacks {} for {} damage!",
            label, target.name, damage
        ));
        hit(target, damage, &mut result);
    } else {
        let inflicted = attacker.roll_inflict_sickness(rng);
        result.log(format!(
            "{} inflicts {} sickness onto {}!",
            label, inflicted, target.name
        ));
        infect(target, inflicted, &mut result);
    }

    Ok(settle(result, target))
}

/// The enemy's turn: a plain attack on the player
pub fn resolve_enemy_action(
    enemy: &Combatant,
    player: &mut Combatant,
) -> Result<TurnResult, CombatError> {
    let mut rng = rand::thread_rng();
    resolve_enemy_action_with_rng(enemy, player, &mut rng)
}

pub fn resolve_enemy_action_with_rng(
    enemy: &Combatant,
    player: &mut Combatant,
    rng: &mut impl Rng,
) -> Result<TurnResult, CombatError> {
    resolve_attack_with_rng(enemy, player, rng)
}

/// The player's turn. Drops any previous guard before acting.
pub fn resolve_player_action(
    player: &mut Combatant,
    enemy: &mut Combatant,
    action: PlayerAction,
) -> Result<TurnResult, CombatError> {
    let mut rng = rand::thread_rng();
    resolve_player_action_with_rng(player, enemy, action, &mut rng)
}

pub fn resolve_player_action_with_rng(
    player: &mut Combatant,
    enemy: &mut Combatant,
    action: PlayerAction,
    rng: &mut impl Rng,
) -> Result<TurnResult, CombatError> {
    if !player.is_hero() {
        return Err(CombatError::NotAHero(player.name.clone()));
    }
    ensure_can_act(player, enemy)?;
    player.set_defending(false);

    match action {
        PlayerAction::Defend => resolve_defend(player, enemy),
        PlayerAction::Attack(mode) => hero_attack(player, enemy, mode, rng),
    }
}

/// Raise the player's guard until their next turn. Rolls nothing.
pub fn resolve_defend(
    player: &mut Combatant,
    enemy: &Combatant,
) -> Result<TurnResult, CombatError> {
    if !player.is_hero() {
        return Err(CombatError::NotAHero(player.name.clone()));
    }
    ensure_can_act(player, enemy)?;
    player.set_defending(true);

    let mut result = TurnResult::new(&player.name, &enemy.name);
    result.defending = true;
    result.log(format!("{} takes a defensive stance", player.name));
    Ok(settle(result, enemy))
}

/// How the hero's equipped weapon strikes this turn
enum HeroStrike {
    Plain,
    SpecialBasic,
    Special {
        special: RollRange,
        inflict_sickness: RollRange,
    },
    Area,
}

/// Where the strike's damage comes from
enum Roll {
    Base,
    Special(RollRange),
    /// Base roll times the target's living members
    Area,
}

fn hero_attack(
    player: &Combatant,
    target: &mut Combatant,
    mode: AttackMode,
    rng: &mut impl Rng,
) -> Result<TurnResult, CombatError> {
    let weapon = player
        .loadout()
        .map(|l| &l.weapon)
        .ok_or_else(|| CombatError::NotAHero(player.name.clone()))?;
    let mut result = TurnResult::new(&player.name, &target.name);

    let strike = match (weapon.kind, mode) {
        (WeaponKind::Standard, AttackMode::Basic) => HeroStrike::Plain,
        (WeaponKind::Aoe, AttackMode::Basic) => HeroStrike::Area,
        (WeaponKind::Special { .. }, AttackMode::Basic) => HeroStrike::SpecialBasic,
        (
            WeaponKind::Special {
                special,
                inflict_sickness,
            },
            AttackMode::Special,
        ) => HeroStrike::Special {
            special,
            inflict_sickness,
        },
        (WeaponKind::Standard, AttackMode::Special) => {
            result.log(no_special_notice(&weapon.name));
            HeroStrike::Plain
        }
        (WeaponKind::Aoe, AttackMode::Special) => {
            result.log(no_special_notice(&weapon.name));
            HeroStrike::Area
        }
    };

    if target.evade(rng) {
        return Ok(miss(result, target));
    }

    let roll = match strike {
        HeroStrike::Plain | HeroStrike::SpecialBasic => Roll::Base,
        HeroStrike::Special { special, .. } => Roll::Special(special),
        HeroStrike::Area => Roll::Area,
    };
    let damage = roll_strike(player, target, roll, rng, &mut result);

    result.log(match strike {
        HeroStrike::Plain => format!("{} uses {} for {} damage!", player.name, weapon.name, damage),
        HeroStrike::SpecialBasic => format!(
            "{} uses {}'s BASIC ATTACK for {} damage!",
            player.name, weapon.name, damage
        ),
        HeroStrike::Special { .. } => format!(
            "{} uses {}'s SPECIAL ATTACK for {} damage!",
            player.name, weapon.name, damage
        ),
        HeroStrike::Area => format!(
            "{} uses {} for a total of {} damage to all enemies in range!",
            player.name, weapon.name, damage
        ),
    });
    hit(target, damage, &mut result);

    if let HeroStrike::Special {
        inflict_sickness, ..
    } = strike
    {
        if !inflict_sickness.is_zero() && !target.is_defeated() {
            let inflicted = inflict_sickness.roll(rng);
            result.log(format!(
                "{} uses {}'s SPECIAL ATTACK and inflicts {} sickness onto {}!",
                player.name, weapon.name, inflicted, target.name
            ));
            infect(target, inflicted, &mut result);
        }
    }

    Ok(settle(result, target))
}

fn no_special_notice(weapon: &str) -> String {
    format!("{} has no special attack, using a normal attack instead", weapon)
}

fn ensure_can_act(attacker: &Combatant, target: &Combatant) -> Result<(), CombatError> {
    if attacker.is_defeated() {
        return Err(CombatError::Defeated(attacker.name.clone()));
    }
    if target.is_defeated() {
        return Err(CombatError::TargetDefeated(target.name.clone()));
    }
    Ok(())
}

fn attacker_label(attacker: &Combatant) -> String {
    if attacker.is_group() {
        format!("{} (Group of {})", attacker.name, attacker.group_size())
    } else {
        attacker.name.clone()
    }
}

fn miss(mut result: TurnResult, target: &Combatant) -> TurnResult {
    debug!(actor = %result.actor, target = %target.name, "attack evaded");
    result.evaded = true;
    result.log(format!("{} missed the attack!", result.actor));
    settle(result, target)
}

/// Roll strike damage and the single crit check
fn roll_strike(
    attacker: &Combatant,
    target: &Combatant,
    roll: Roll,
    rng: &mut impl Rng,
    result: &mut TurnResult,
) -> u32 {
    let base = match roll {
        Roll::Base => attacker.roll_damage(rng),
        Roll::Special(range) => range.roll(rng),
        Roll::Area => attacker
            .roll_damage(rng)
            .saturating_mul(target.group_size()),
    };
    let (damage, critical) = attacker.crit(base, rng);
    debug!(actor = %attacker.name, base, damage, critical, "strike rolled");

    if critical {
        result.log("CRITICAL HIT!");
    }
    result.critical = critical;
    result.rolled_damage = damage;
    damage
}

fn hit(target: &mut Combatant, amount: u32, result: &mut TurnResult) {
    let taken = target.take_damage(amount);
    result.damage_dealt = result.damage_dealt.saturating_add(taken.dealt);
    note_damage(target, &taken, result);
}

fn infect(target: &mut Combatant, inflicted: u32, result: &mut TurnResult) {
    target.add_sickness(inflicted);
    result.sickness_inflicted = result.sickness_inflicted.saturating_add(inflicted);
    if let Some(taken) = target.apply_sickness() {
        result.sickness_damage = result.sickness_damage.saturating_add(taken.dealt);
        result.log(format!(
            "{} suffers {} damage from sickness",
            target.name, taken.dealt
        ));
        note_damage(target, &taken, result);
    }
}

fn note_damage(target: &Combatant, taken: &DamageTaken, result: &mut TurnResult) {
    if taken.defended {
        result.target_defended = true;
        result.log(format!("{} defends the attack!", target.name));
    }
    let line = if target.is_defeated() {
        format!("{} has been put to sleep", target.name)
    } else if let Some(group) = target.group_state() {
        format!(
            "{} has taken {} damage and has {} member(s) left with a total of {} health remaining!",
            target.name,
            taken.dealt,
            group.current_size(),
            taken.hp_after
        )
    } else {
        format!(
            "{} has taken {} damage and has {} health remaining!",
            target.name, taken.dealt, taken.hp_after
        )
    };
    result.log(line);
}

fn settle(mut result: TurnResult, target: &Combatant) -> TurnResult {
    result.target_hp = target.hp();
    result.target_group_size = target.group_size();
    result.defeated = target.is_defeated();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equipment::{Armour, Weapon};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn hero_with(weapon: Weapon, agility: u32, reduction: f64) -> Combatant {
        let armour = Armour::new("test_armour", "Test Armour", "", 1000, agility, reduction).unwrap();
        Combatant::hero("Ayla", weapon, armour)
    }

    fn club(damage: u32) -> Weapon {
        Weapon::new("club", "Club", "", RollRange::fixed(damage))
    }

    fn brute(damage: u32, agility: u32) -> Combatant {
        Combatant::solo("Brute", 1000, agility, RollRange::fixed(damage)).unwrap()
    }

    #[test]
    fn test_enemy_hits_unarmoured_player() {
        let mut player = hero_with(club(1), 0, 0.0);
        let enemy = brute(50, 0);
        let result = resolve_enemy_action_with_rng(&enemy, &mut player, &mut rng()).unwrap();
        assert_eq!(player.hp(), 950);
        assert_eq!(result.damage_dealt, 50);
        assert_eq!(result.target_hp, 950);
        assert!(!result.evaded);
        assert!(!result.defeated);
    }

    #[test]
    fn test_evaded_attack_changes_nothing() {
        let enemy = Combatant::solo("Snake", 10, 0, RollRange::fixed(5))
            .unwrap()
            .with_inflict_sickness(RollRange::fixed(10));
        let mut player = hero_with(club(1), 100, 0.0);
        let result = resolve_attack_with_rng(&enemy, &mut player, &mut rng()).unwrap();
        assert!(result.evaded);
        assert_eq!(player.hp(), 1000);
        assert_eq!(player.sickness(), 0);
        assert_eq!(result.messages, vec!["Snake missed the attack!".to_string()]);
    }

    #[test]
    fn test_innate_sickness_replaces_damage() {
        let enemy = Combatant::solo("Snake", 10, 0, RollRange::fixed(500))
            .unwrap()
            .with_inflict_sickness(RollRange::fixed(10));
        let mut player = hero_with(club(1), 0, 0.0);

        let first = resolve_attack_with_rng(&enemy, &mut player, &mut rng()).unwrap();
        assert_eq!(first.damage_dealt, 0);
        assert_eq!(first.sickness_inflicted, 10);
        assert_eq!(first.sickness_damage, 10);
        assert_eq!(player.hp(), 990);

        // Stacks accumulate and hit all at once
        let second = resolve_attack_with_rng(&enemy, &mut player, &mut rng()).unwrap();
        assert_eq!(second.sickness_damage, 20);
        assert_eq!(player.hp(), 970);
        assert_eq!(player.sickness(), 20);
    }

    #[test]
    fn test_group_sums_member_rolls() {
        let group = Combatant::group("Tribe", 5, 100, 0, RollRange::fixed(10)).unwrap();
        let mut player = hero_with(club(1), 0, 0.0);
        let result = resolve_attack_with_rng(&group, &mut player, &mut rng()).unwrap();
        assert_eq!(result.damage_dealt, 50);
        assert!(result.messages[0].starts_with("Tribe (Group of 5) attacks Ayla"));
    }

    #[test]
    fn test_group_crit_doubles_total() {
        let group = Combatant::group("Tribe", 3, 100, 0, RollRange::fixed(10))
            .unwrap()
            .with_crit_chance(100)
            .unwrap();
        let mut player = hero_with(club(1), 0, 0.0);
        let result = resolve_attack_with_rng(&group, &mut player, &mut rng()).unwrap();
        assert!(result.critical);
        assert_eq!(result.damage_dealt, 60);
    }

    #[test]
    fn test_defend_halves_next_hit() {
        let mut player = hero_with(club(1), 0, 0.5);
        let mut enemy = brute(100, 0);
        let mut rng = rng();

        let defend =
            resolve_player_action_with_rng(&mut player, &mut enemy, PlayerAction::Defend, &mut rng)
                .unwrap();
        assert!(defend.defending);
        assert!(player.is_defending());

        let hit = resolve_enemy_action_with_rng(&enemy, &mut player, &mut rng).unwrap();
        assert!(hit.target_defended);
        assert_eq!(hit.damage_dealt, 25);
        assert_eq!(player.hp(), 975);

        // Guard drops at the start of the next player turn
        resolve_player_action_with_rng(&mut player, &mut enemy, PlayerAction::attack(), &mut rng)
            .unwrap();
        assert!(!player.is_defending());
    }

    #[test]
    fn test_standard_weapon_hit() {
        let mut player = hero_with(club(30), 0, 0.0);
        let mut enemy = brute(1, 0);
        let result =
            resolve_player_action_with_rng(&mut player, &mut enemy, PlayerAction::attack(), &mut rng())
                .unwrap();
        assert_eq!(enemy.hp(), 970);
        assert_eq!(result.messages[0], "Ayla uses Club for 30 damage!");
    }

    #[test]
    fn test_special_on_standard_weapon_falls_back() {
        let mut player = hero_with(club(30), 0, 0.0);
        let mut enemy = brute(1, 0);
        let result = resolve_player_action_with_rng(
            &mut player,
            &mut enemy,
            PlayerAction::special(),
            &mut rng(),
        )
        .unwrap();
        assert_eq!(
            result.messages[0],
            "Club has no special attack, using a normal attack instead"
        );
        assert_eq!(result.damage_dealt, 30);
    }

    #[test]
    fn test_special_attack_deals_damage_then_sickness() {
        let dagger = Weapon::new("poisoned_dagger", "Poisoned Dagger", "", RollRange::fixed(20))
            .with_kind(WeaponKind::Special {
                special: RollRange::fixed(15),
                inflict_sickness: RollRange::fixed(5),
            });
        let mut player = hero_with(dagger, 0, 0.0);
        let mut enemy = brute(1, 0);
        let result = resolve_player_action_with_rng(
            &mut player,
            &mut enemy,
            PlayerAction::special(),
            &mut rng(),
        )
        .unwrap();
        assert_eq!(result.damage_dealt, 15);
        assert_eq!(result.sickness_inflicted, 5);
        assert_eq!(result.sickness_damage, 5);
        assert_eq!(enemy.hp(), 980);
        assert_eq!(enemy.sickness(), 5);
    }

    #[test]
    fn test_special_weapon_basic_attack() {
        let dagger = Weapon::new("poisoned_dagger", "Poisoned Dagger", "", RollRange::fixed(20))
            .with_kind(WeaponKind::Special {
                special: RollRange::fixed(15),
                inflict_sickness: RollRange::fixed(5),
            });
        let mut player = hero_with(dagger, 0, 0.0);
        let mut enemy = brute(1, 0);
        let result =
            resolve_player_action_with_rng(&mut player, &mut enemy, PlayerAction::attack(), &mut rng())
                .unwrap();
        assert_eq!(result.damage_dealt, 20);
        assert_eq!(result.sickness_inflicted, 0);
        assert!(result.messages[0].contains("BASIC ATTACK"));
    }

    #[test]
    fn test_area_weapon_scales_with_group() {
        let brambles = Weapon::new("brambles", "Brambles", "", RollRange::fixed(10))
            .with_kind(WeaponKind::Aoe);
        let mut player = hero_with(brambles, 0, 0.0);
        let mut group = Combatant::group("Wolves", 4, 20, 0, RollRange::fixed(5)).unwrap();
        let result =
            resolve_player_action_with_rng(&mut player, &mut group, PlayerAction::attack(), &mut rng())
                .unwrap();
        assert_eq!(result.damage_dealt, 40);
        assert_eq!(group.hp(), 40);
        assert_eq!(result.target_group_size, 2);
    }

    #[test]
    fn test_area_weapon_on_single_target() {
        let brambles = Weapon::new("brambles", "Brambles", "", RollRange::fixed(10))
            .with_kind(WeaponKind::Aoe);
        let mut player = hero_with(brambles, 0, 0.0);
        let mut enemy = brute(1, 0);
        let result =
            resolve_player_action_with_rng(&mut player, &mut enemy, PlayerAction::attack(), &mut rng())
                .unwrap();
        assert_eq!(result.damage_dealt, 10);
    }

    #[test]
    fn test_killing_blow() {
        let mut player = hero_with(club(5000), 0, 0.0);
        let mut enemy = brute(1, 0);
        let result =
            resolve_player_action_with_rng(&mut player, &mut enemy, PlayerAction::attack(), &mut rng())
                .unwrap();
        assert!(result.defeated);
        assert_eq!(result.target_hp, 0);
        assert_eq!(result.target_group_size, 0);
        assert_eq!(result.messages.last().unwrap(), "Brute has been put to sleep");
    }

    #[test]
    fn test_defeated_cannot_act() {
        let mut player = hero_with(club(1), 0, 0.0);
        let mut enemy = brute(1, 0);
        enemy.take_damage(5000);
        assert_eq!(
            resolve_attack_with_rng(&enemy, &mut player, &mut rng()),
            Err(CombatError::Defeated("Brute".to_string()))
        );
        assert_eq!(
            resolve_player_action_with_rng(&mut player, &mut enemy, PlayerAction::attack(), &mut rng()),
            Err(CombatError::TargetDefeated("Brute".to_string()))
        );
    }

    #[test]
    fn test_enemy_cannot_take_player_turn() {
        let mut enemy = brute(1, 0);
        let mut other = brute(1, 0);
        assert!(matches!(
            resolve_player_action_with_rng(&mut enemy, &mut other, PlayerAction::Defend, &mut rng()),
            Err(CombatError::NotAHero(_))
        ));
    }
}
