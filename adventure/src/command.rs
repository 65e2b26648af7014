//! Command parsing for typed player input

use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Take an exit; the direction may be several words
    Go(String),
    PickUp,
    ShowWeapons,
    ShowArmour,
    EquipWeapon(usize),
    EquipArmour(usize),
    Status,
    Commands,
    Attack,
    Special,
    Defend,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Please enter a command")]
    Empty,
    #[error("Please specify a direction to go")]
    MissingDirection,
    #[error("Show what? Use 'show weapons' or 'show armour'")]
    UnknownListing,
    #[error("Invalid equip command. Use 'equip weapon <code>' or 'equip armour <code>'")]
    IncompleteEquip,
    #[error("Invalid code '{0}'. Check 'show weapons' or 'show armour' for valid codes")]
    InvalidCode(String),
    #[error("Invalid action '{0}'. Try 'commands' to see available actions")]
    Unknown(String),
}

/// Command reference shown by `commands`
pub const HELP: &[(&str, &str)] = &[
    ("go <direction>", "Move in a direction (e.g. go north, go follow river)"),
    ("pick up", "Pick up the item in the current area"),
    ("show weapons", "Display weapons in your inventory"),
    ("show armour", "Display armour in your inventory"),
    ("equip weapon <code>", "Equip a weapon by its code (e.g. equip weapon 0)"),
    ("equip armour <code>", "Equip armour by its code (e.g. equip armour 0)"),
    ("status", "Display your current status, including HP, weapon, and armour"),
    ("commands", "Show this list of commands"),
    ("attack", "In battle: attack with your weapon"),
    ("special", "In battle: use your weapon's special attack"),
    ("defend", "In battle: halve the next hit you take"),
];

impl Command {
    /// Whether this only makes sense mid-battle
    pub fn is_battle_action(&self) -> bool {
        matches!(self, Command::Attack | Command::Special | Command::Defend)
    }

    /// Read-only commands are allowed at any time
    pub fn is_informational(&self) -> bool {
        matches!(
            self,
            Command::ShowWeapons | Command::ShowArmour | Command::Status | Command::Commands
        )
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let lowered = input.trim().to_lowercase();
        let words: Vec<&str> = lowered.split_whitespace().collect();
        let Some((&verb, rest)) = words.split_first() else {
            return Err(CommandError::Empty);
        };

        match verb {
            "go" => {
                if rest.is_empty() {
                    Err(CommandError::MissingDirection)
                } else {
                    Ok(Command::Go(rest.join(" ")))
                }
            }
            "pick" => Ok(Command::PickUp),
            "show" => match rest.first() {
                Some(&"weapons") => Ok(Command::ShowWeapons),
                Some(&"armour") => Ok(Command::ShowArmour),
                _ => Err(CommandError::UnknownListing),
            },
            "equip" => {
                let (Some(&slot), Some(&code)) = (rest.first(), rest.get(1)) else {
                    return Err(CommandError::IncompleteEquip);
                };
                let code: usize = code
                    .parse()
                    .map_err(|_| CommandError::InvalidCode(code.to_string()))?;
                match slot {
                    "weapon" => Ok(Command::EquipWeapon(code)),
                    "armour" => Ok(Command::EquipArmour(code)),
                    _ => Err(CommandError::IncompleteEquip),
                }
            }
            "status" => Ok(Command::Status),
            "commands" | "help" => Ok(Command::Commands),
            "attack" => Ok(Command::Attack),
            "special" => Ok(Command::Special),
            "defend" => Ok(Command::Defend),
            _ => Err(CommandError::Unknown(input.trim().to_string())),
        }
    }
}
