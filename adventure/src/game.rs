//! Game - Session state and the rules applied to each line of input
//!
//! The session owns everything: hero, world, inventory, the RNG and the
//! battle in progress. The UI feeds it one line at a time through
//! [`Game::submit`] and redraws from its accessors. Bad input is reported
//! and the game simply waits for the next line.

use crate::command::{Command, HELP};
use crate::inventory::Inventory;
use crate::world::{Area, World};
use combat_core::config::load_catalog;
use combat_core::{default_catalog, Battle, Catalog, Combatant, ConfigError, Outcome, PlayerAction};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::Path;
use tracing::{info, warn};

/// Oldest messages are dropped past this many
pub const MAX_MESSAGES: usize = 200;

const STARTING_WEAPON: &str = "fists";
const STARTING_ARMOUR: &str = "clothing";

const INTRO: &[&str] = &[
    "You stumble upon a mysterious artefact during an archaeological excavation.",
    "As you touch it, the artefact activates, engulfing you in a bright light and you lose consciousness.",
    "You hear echoes of soft whispers.",
    "When you regain consciousness, you find yourself in the dense and untamed world of the Stone Age.",
    "You can't seem to remember your name, until you see the nametag on your chest.",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the name on the nametag
    Naming,
    /// Waiting for "yes" to accept this name
    ConfirmName(String),
    Exploring,
    Battle,
    Won,
    Lost,
}

pub struct Game {
    hero: Combatant,
    world: World,
    inventory: Inventory,
    current_area: String,
    battle: Option<Battle>,
    phase: Phase,
    messages: Vec<String>,
    rng: ChaCha8Rng,
}

impl Game {
    /// New game on the built-in catalog and map
    pub fn new(seed: u64) -> Result<Self, ConfigError> {
        let catalog = default_catalog()?;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let world = World::default_world(&catalog, &mut rng)?;
        Self::with_world(&catalog, world, rng)
    }

    /// New game on data files from `dir`
    pub fn load(dir: &Path, seed: u64) -> Result<Self, ConfigError> {
        let catalog = load_catalog(dir)?;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let world = World::load(&dir.join("world.toml"), &catalog, &mut rng)?;
        Self::with_world(&catalog, world, rng)
    }

    pub fn with_world(catalog: &Catalog, world: World, rng: ChaCha8Rng) -> Result<Self, ConfigError> {
        let weapon = catalog.weapon(STARTING_WEAPON)?.clone();
        let armour = catalog.armour(STARTING_ARMOUR)?.clone();
        let mut game = Game {
            hero: Combatant::hero("Player", weapon.clone(), armour.clone()),
            inventory: Inventory::new(weapon, armour),
            current_area: world.start().to_string(),
            world,
            battle: None,
            phase: Phase::Naming,
            messages: Vec::new(),
            rng,
        };
        for line in INTRO {
            game.log(*line);
        }
        game.log("What does the nametag say?");
        Ok(game)
    }

    // === Accessors ===

    pub fn hero(&self) -> &Combatant {
        &self.hero
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn current_area(&self) -> Option<&Area> {
        self.world.area(&self.current_area)
    }

    pub fn battle(&self) -> Option<&Battle> {
        self.battle.as_ref()
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Won | Phase::Lost)
    }

    /// Question shown next to the input line
    pub fn prompt(&self) -> &'static str {
        match self.phase {
            Phase::Naming => "What does the nametag say?",
            Phase::ConfirmName(_) => "Are you sure that's what the nametag says? (yes/no)",
            Phase::Exploring => "What do you want to do?",
            Phase::Battle => "Attack, special or defend?",
            Phase::Won | Phase::Lost => "Press Esc to quit",
        }
    }

    // === Input ===

    /// Handle one line of player input
    pub fn submit(&mut self, line: &str) {
        let line = line.trim();
        if !line.is_empty() {
            self.log(format!("> {}", line));
        }

        match self.phase.clone() {
            Phase::Naming => self.read_name(line),
            Phase::ConfirmName(name) => self.confirm_name(name, line),
            Phase::Exploring | Phase::Battle => match line.parse::<Command>() {
                Ok(command) => self.run(command),
                Err(e) => self.log(e.to_string()),
            },
            Phase::Won | Phase::Lost => self.log("The game is over. Press Esc to quit."),
        }
    }

    fn read_name(&mut self, line: &str) {
        if line.is_empty() {
            self.log("What does the nametag say?");
            return;
        }
        self.phase = Phase::ConfirmName(line.to_string());
        self.log("Are you sure that's what the nametag says? (yes/no)");
    }

    fn confirm_name(&mut self, name: String, line: &str) {
        if !line.eq_ignore_ascii_case("yes") {
            self.phase = Phase::Naming;
            self.log("Read it correctly then!");
            self.log("What does the nametag say?");
            return;
        }
        info!(name = %name, "game started");
        self.log(format!("Welcome, {}!", name));
        self.log("Use 'commands' to see available commands");
        self.hero.name = name;
        self.phase = Phase::Exploring;
        self.arrive();
    }

    fn run(&mut self, command: Command) {
        if command.is_informational() {
            self.inform(&command);
            return;
        }

        let in_battle = self.phase == Phase::Battle;
        if command.is_battle_action() && !in_battle {
            self.log("There is nothing to fight here.");
            return;
        }

        match command {
            Command::Attack => self.fight(PlayerAction::attack()),
            Command::Special => self.fight(PlayerAction::special()),
            Command::Defend => self.fight(PlayerAction::Defend),
            Command::PickUp if in_battle => self.log("You can't pick up items while in combat!"),
            _ if in_battle => {
                self.log("You can't do that in the middle of a fight! Choose to attack, special or defend");
            }
            Command::Go(direction) => self.travel(&direction),
            Command::PickUp => self.pick_up(),
            Command::EquipWeapon(code) => self.equip_weapon(code),
            Command::EquipArmour(code) => self.equip_armour(code),
            Command::ShowWeapons | Command::ShowArmour | Command::Status | Command::Commands => {}
        }
    }

    fn inform(&mut self, command: &Command) {
        let lines = match command {
            Command::ShowWeapons => {
                let mut lines = vec!["Weapons:".to_string()];
                lines.extend(self.inventory.weapon_listing());
                lines
            }
            Command::ShowArmour => {
                let mut lines = vec!["Armour:".to_string()];
                lines.extend(self.inventory.armour_listing());
                lines
            }
            Command::Status => self.status_lines(),
            Command::Commands => {
                let mut lines = vec!["Available Commands:".to_string()];
                lines.extend(
                    HELP.iter()
                        .map(|(usage, about)| format!("{:<20} | {}", usage, about)),
                );
                lines
            }
            _ => Vec::new(),
        };
        self.log_all(lines);
    }

    // === Exploration ===

    fn travel(&mut self, direction: &str) {
        let Some(next) = self
            .world
            .travel(&self.current_area, direction)
            .map(|area| area.name.clone())
        else {
            self.log("You can't go that way.");
            return;
        };
        info!(from = %self.current_area, to = %next, "travelled");
        self.log(format!("You go to {}", next));
        self.current_area = next;
        self.arrive();
    }

    /// Describe the current area and start a fight if something lives here
    fn arrive(&mut self) {
        let lines = match self.current_area() {
            Some(area) => describe(area),
            None => return,
        };
        self.log_all(lines);
        self.encounter();
    }

    fn encounter(&mut self) {
        let Some(enemy) = self
            .world
            .area_mut(&self.current_area)
            .and_then(|area| area.enemy.take())
        else {
            return;
        };

        if enemy.is_group() {
            self.log(format!(
                "A wild {} appears! (Group of {})",
                enemy.name,
                enemy.group_size()
            ));
        } else {
            self.log(format!("A wild {} appears!", enemy.name));
        }
        self.battle = Some(Battle::start(&self.hero, enemy));
        self.phase = Phase::Battle;
        self.log("Your turn: attack, special or defend");
    }

    fn pick_up(&mut self) {
        let (enemy_present, item) = match self.world.area_mut(&self.current_area) {
            Some(area) if area.enemy.is_some() => (true, None),
            Some(area) => (false, area.item.take()),
            None => (false, None),
        };

        if enemy_present {
            self.log("You can't pick up items while in combat!");
            return;
        }
        let Some(item) = item else {
            self.log("There are no items to pick up in this area.");
            return;
        };

        let name = item.name().to_string();
        if self.inventory.pick_up(item) {
            info!(item = %name, "picked up");
            self.log(format!("You have picked up {}", name));
        } else {
            self.log(format!("You already carry {}", name));
        }
        if self.world.is_won() {
            self.win();
        }
    }

    fn equip_weapon(&mut self, code: usize) {
        let Some(weapon) = self.inventory.weapon(code).cloned() else {
            self.log("Please provide a valid code for the weapon you want to equip");
            return;
        };
        let name = weapon.name.clone();
        match self.hero.equip_weapon(weapon) {
            Ok(()) => self.log(format!("You have equipped {} as your weapon", name)),
            Err(e) => self.log(e.to_string()),
        }
    }

    fn equip_armour(&mut self, code: usize) {
        let Some(armour) = self.inventory.armour_piece(code).cloned() else {
            self.log("Please provide a valid code for the armour you want to equip");
            return;
        };
        let name = armour.name.clone();
        match self.hero.equip_armour(armour) {
            Ok(()) => self.log(format!("You have equipped {} as your armour", name)),
            Err(e) => self.log(e.to_string()),
        }
    }

    // === Battle ===

    fn fight(&mut self, action: PlayerAction) {
        let Some(battle) = self.battle.as_mut() else {
            self.phase = Phase::Exploring;
            return;
        };

        match battle.play_round(&mut self.hero, action, &mut self.rng) {
            Ok(round) => {
                let lines: Vec<String> = round.messages().cloned().collect();
                self.log_all(lines);
                if round.outcome.is_finished() {
                    self.end_battle();
                }
            }
            Err(e) => {
                warn!(error = %e, "battle action rejected");
                self.log(e.to_string());
            }
        }
    }

    fn end_battle(&mut self) {
        let Some(battle) = self.battle.take() else {
            return;
        };
        let report = battle.finish(&mut self.hero);
        self.log_all(report.messages);

        match report.outcome {
            Outcome::PlayerWon => {
                self.log(format!("You recover to {} health", self.hero.hp()));
                self.phase = Phase::Exploring;
                if self.world.is_won() {
                    self.win();
                } else {
                    self.arrive();
                }
            }
            Outcome::PlayerLost => {
                self.return_enemy(report.survivor);
                self.phase = Phase::Lost;
                info!(area = %self.current_area, "player defeated");
                self.log("Final Status:");
                let lines = self.status_lines();
                self.log_all(lines);
            }
            Outcome::Ongoing => {
                self.return_enemy(report.survivor);
                self.phase = Phase::Exploring;
            }
        }
    }

    fn return_enemy(&mut self, enemy: Option<Combatant>) {
        if let Some(area) = self.world.area_mut(&self.current_area) {
            area.enemy = enemy;
        }
    }

    fn win(&mut self) {
        info!("game won");
        self.phase = Phase::Won;
        self.log("You have freed your souls from this cruel game! You win!");
        self.log("Final Status:");
        let lines = self.status_lines();
        self.log_all(lines);
    }

    // === Display ===

    pub fn status_lines(&self) -> Vec<String> {
        let hero = &self.hero;
        let mut lines = vec![
            format!("Player: {}", hero.name),
            format!("HP: {}/{}", hero.hp(), hero.hp_max()),
            format!("Agility: {}", hero.agility()),
        ];
        if hero.sickness() > 0 {
            lines.push(format!("Sickness: {}", hero.sickness()));
        }
        if let Some(loadout) = hero.loadout() {
            lines.push(format!("Weapon: {}", loadout.weapon.name));
            lines.extend(loadout.weapon.stat_lines().into_iter().map(|l| format!("  {}", l)));
            lines.push(format!("Armour: {}", loadout.armour.name));
            lines.extend(loadout.armour.stat_lines().into_iter().map(|l| format!("  {}", l)));
        }
        lines
    }

    fn log(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
        if self.messages.len() > MAX_MESSAGES {
            let excess = self.messages.len() - MAX_MESSAGES;
            self.messages.drain(..excess);
        }
    }

    fn log_all(&mut self, lines: impl IntoIterator<Item = String>) {
        for line in lines {
            self.log(line);
        }
    }
}

/// Area summary: name, description, exits and the item lying here
pub fn describe(area: &Area) -> Vec<String> {
    let mut lines = vec![
        format!("Current Location: {}", area.name),
        area.description.clone(),
    ];
    if area.exits.is_empty() {
        lines.push("There is no way out.".to_string());
    } else {
        let moves: Vec<&str> = area.exits.iter().map(|e| e.action.as_str()).collect();
        lines.push(format!("Available Moves: {}", moves.join(", ")));
    }
    match &area.item {
        Some(item) => lines.push(format!("Item here: {} - {}", item.name(), item.description())),
        None => lines.push("No items here".to_string()),
    }
    lines
}
