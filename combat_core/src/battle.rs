//! Battle - Turn order and outcome for one player-versus-enemy fight
//!
//! The battle owns the enemy for its duration; the player stays with the
//! caller and is lent to each turn. Turns alternate player, enemy, player...
//! and the battle refuses any action once one side is down.

use crate::combat::{
    resolve_defend, resolve_enemy_action_with_rng, resolve_player_action_with_rng, AttackMode,
    CombatError, PlayerAction, Side, TurnResult,
};
use crate::combatant::Combatant;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Ongoing,
    PlayerWon,
    PlayerLost,
}

impl Outcome {
    pub fn is_finished(&self) -> bool {
        !matches!(self, Outcome::Ongoing)
    }
}

/// Both halves of a round. The enemy half is missing when it fell first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundReport {
    pub player: TurnResult,
    pub enemy: Option<TurnResult>,
    pub outcome: Outcome,
}

impl RoundReport {
    /// All narration for the round in order
    pub fn messages(&self) -> impl Iterator<Item = &String> {
        self.player
            .messages
            .iter()
            .chain(self.enemy.iter().flat_map(|t| t.messages.iter()))
    }
}

/// What is left once a battle is closed
#[derive(Debug, Clone, PartialEq)]
pub struct BattleReport {
    pub outcome: Outcome,
    /// Rounds started, including the last one
    pub rounds: u32,
    /// The enemy if it survived, so it can go back where it came from
    pub survivor: Option<Combatant>,
    pub messages: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Battle {
    enemy: Combatant,
    next: Side,
    round: u32,
    outcome: Outcome,
}

impl Battle {
    /// Pair the player with an enemy. The player always moves first.
    pub fn start(player: &Combatant, enemy: Combatant) -> Self {
        info!(player = %player.name, enemy = %enemy.name, enemy_hp = enemy.hp(), "battle started");
        let outcome = if player.is_defeated() {
            Outcome::PlayerLost
        } else if enemy.is_defeated() {
            Outcome::PlayerWon
        } else {
            Outcome::Ongoing
        };
        Battle {
            enemy,
            next: Side::Player,
            round: 1,
            outcome,
        }
    }

    pub fn enemy(&self) -> &Combatant {
        &self.enemy
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    /// Whose turn it is
    pub fn next_turn(&self) -> Side {
        self.next
    }

    /// Current outcome; only changes when a turn is taken
    pub fn is_over(&self) -> Outcome {
        self.outcome
    }

    pub fn player_attack(
        &mut self,
        player: &mut Combatant,
        mode: AttackMode,
        rng: &mut impl Rng,
    ) -> Result<TurnResult, CombatError> {
        self.player_turn(player, PlayerAction::Attack(mode), rng)
    }

    /// Defending rolls nothing, so no RNG is needed
    pub fn player_defend(&mut self, player: &mut Combatant) -> Result<TurnResult, CombatError> {
        self.expect_turn(Side::Player)?;
        let result = resolve_defend(player, &self.enemy)?;
        self.pass_to_enemy();
        Ok(result)
    }

    pub fn player_turn(
        &mut self,
        player: &mut Combatant,
        action: PlayerAction,
        rng: &mut impl Rng,
    ) -> Result<TurnResult, CombatError> {
        self.expect_turn(Side::Player)?;
        let result = resolve_player_action_with_rng(player, &mut self.enemy, action, rng)?;
        self.pass_to_enemy();
        Ok(result)
    }

    pub fn enemy_attack(
        &mut self,
        player: &mut Combatant,
        rng: &mut impl Rng,
    ) -> Result<TurnResult, CombatError> {
        self.expect_turn(Side::Enemy)?;
        let result = resolve_enemy_action_with_rng(&self.enemy, player, rng)?;
        if player.is_defeated() {
            self.end(Outcome::PlayerLost);
        } else {
            self.next = Side::Player;
            self.round += 1;
        }
        Ok(result)
    }

    /// Player turn, then the enemy's if it is still standing
    pub fn play_round(
        &mut self,
        player: &mut Combatant,
        action: PlayerAction,
        rng: &mut impl Rng,
    ) -> Result<RoundReport, CombatError> {
        let player_turn = self.player_turn(player, action, rng)?;
        let enemy_turn = if self.outcome.is_finished() {
            None
        } else {
            Some(self.enemy_attack(player, rng)?)
        };
        Ok(RoundReport {
            player: player_turn,
            enemy: enemy_turn,
            outcome: self.outcome,
        })
    }

    /// Close the battle. A winning player is restored to full hp.
    pub fn finish(self, player: &mut Combatant) -> BattleReport {
        let mut messages = Vec::new();
        let survivor = match self.outcome {
            Outcome::PlayerWon => {
                messages.push(format!("{} has been defeated!", self.enemy.name));
                player.restore();
                None
            }
            Outcome::PlayerLost => {
                messages.push("You have been defeated! Game Over!".to_string());
                Some(self.enemy)
            }
            Outcome::Ongoing => Some(self.enemy),
        };
        info!(outcome = ?self.outcome, rounds = self.round, "battle finished");
        BattleReport {
            outcome: self.outcome,
            rounds: self.round,
            survivor,
            messages,
        }
    }

    fn expect_turn(&self, side: Side) -> Result<(), CombatError> {
        if self.outcome.is_finished() {
            return Err(CombatError::BattleOver);
        }
        if self.next != side {
            return Err(CombatError::OutOfTurn(side));
        }
        Ok(())
    }

    fn pass_to_enemy(&mut self) {
        if self.enemy.is_defeated() {
            self.end(Outcome::PlayerWon);
        } else {
            self.next = Side::Enemy;
        }
    }

    fn end(&mut self, outcome: Outcome) {
        info!(enemy = %self.enemy.name, ?outcome, round = self.round, "battle decided");
        self.outcome = outcome;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equipment::{Armour, RollRange, Weapon};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn hero(damage: u32, hp: u32) -> Combatant {
        Combatant::hero(
            "Ayla",
            Weapon::new("club", "Club", "", RollRange::fixed(damage)),
            Armour::new("hide", "Hide", "", hp, 0, 0.0).unwrap(),
        )
    }

    fn enemy(hp: u32, damage: u32) -> Combatant {
        Combatant::solo("Wolf", hp, 0, RollRange::fixed(damage)).unwrap()
    }

    #[test]
    fn test_turn_order_enforced() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut player = hero(5, 100);
        let mut battle = Battle::start(&player, enemy(100, 5));

        assert_eq!(
            battle.enemy_attack(&mut player, &mut rng),
            Err(CombatError::OutOfTurn(Side::Enemy))
        );
        battle
            .player_attack(&mut player, AttackMode::Basic, &mut rng)
            .unwrap();
        assert_eq!(battle.next_turn(), Side::Enemy);
        assert_eq!(
            battle.player_defend(&mut player),
            Err(CombatError::OutOfTurn(Side::Player))
        );
        battle.enemy_attack(&mut player, &mut rng).unwrap();
        assert_eq!(battle.round(), 2);
    }

    #[test]
    fn test_player_wins_and_is_restored() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut player = hero(20, 100);
        let mut battle = Battle::start(&player, enemy(30, 10));

        let first = battle
            .play_round(&mut player, PlayerAction::attack(), &mut rng)
            .unwrap();
        assert_eq!(first.outcome, Outcome::Ongoing);
        assert_eq!(player.hp(), 90);

        let second = battle
            .play_round(&mut player, PlayerAction::attack(), &mut rng)
            .unwrap();
        assert_eq!(second.outcome, Outcome::PlayerWon);
        assert!(second.enemy.is_none());
        assert_eq!(battle.is_over(), Outcome::PlayerWon);

        let report = battle.finish(&mut player);
        assert_eq!(report.outcome, Outcome::PlayerWon);
        assert!(report.survivor.is_none());
        assert_eq!(player.hp(), 100);
    }

    #[test]
    fn test_player_loses() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut player = hero(1, 10);
        let mut battle = Battle::start(&player, enemy(1000, 50));

        let round = battle
            .play_round(&mut player, PlayerAction::attack(), &mut rng)
            .unwrap();
        assert_eq!(round.outcome, Outcome::PlayerLost);
        assert!(player.is_defeated());
        assert_eq!(
            battle.play_round(&mut player, PlayerAction::attack(), &mut rng),
            Err(CombatError::BattleOver)
        );

        let report = battle.finish(&mut player);
        assert_eq!(player.hp(), 0);
        assert!(report.survivor.is_some());
    }

    #[test]
    fn test_guard_halves_one_hit_per_defend() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut player = hero(1, 1000);
        let mut battle = Battle::start(&player, enemy(10_000, 100));

        for expected_hp in [950, 900] {
            let defend = battle.player_defend(&mut player).unwrap();
            assert!(defend.defending);
            let hit = battle.enemy_attack(&mut player, &mut rng).unwrap();
            assert!(hit.target_defended);
            assert_eq!(hit.damage_dealt, 50);
            assert_eq!(player.hp(), expected_hp);
        }

        // Attacking drops the guard, so the next hit lands in full
        battle
            .player_attack(&mut player, AttackMode::Basic, &mut rng)
            .unwrap();
        let hit = battle.enemy_attack(&mut player, &mut rng).unwrap();
        assert!(!hit.target_defended);
        assert_eq!(hit.damage_dealt, 100);
        assert_eq!(player.hp(), 800);
    }

    #[test]
    fn test_is_over_is_idempotent() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut player = hero(5, 100);
        let mut battle = Battle::start(&player, enemy(100, 5));
        assert_eq!(battle.is_over(), Outcome::Ongoing);
        assert_eq!(battle.is_over(), Outcome::Ongoing);
        battle
            .play_round(&mut player, PlayerAction::attack(), &mut rng)
            .unwrap();
        let first = battle.is_over();
        assert_eq!(battle.is_over(), first);
    }

    #[test]
    fn test_round_messages_in_order() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut player = hero(5, 100);
        let mut battle = Battle::start(&player, enemy(100, 5));
        let round = battle
            .play_round(&mut player, PlayerAction::attack(), &mut rng)
            .unwrap();
        let messages: Vec<&String> = round.messages().collect();
        assert_eq!(messages[0], "Ayla uses Club for 5 damage!");
        assert!(messages.iter().any(|m| m.starts_with("Wolf attacks Ayla")));
    }
}
