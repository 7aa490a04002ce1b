//! Line-oriented input mapping. Each stdin line becomes one `InputAction`.
//!
//! Single keys follow the usual layout: `w`/`s` move along -z/+z, `a`/`d`
//! along -x/+x, `1`/`2` select a weapon slot, space or `f` fires.

use std::str::FromStr;

use thiserror::Error;

use arena_core::commands::PlayerCommand;
use arena_core::components::EntityId;
use arena_core::error::ArenaError;
use arena_core::types::Vector3;
use arena_core::weapons::WeaponId;

#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("unknown input: {0:?}")]
    Unknown(String),

    #[error("{command} expects {expected}")]
    BadArguments {
        command: &'static str,
        expected: &'static str,
    },

    #[error(transparent)]
    Rejected(#[from] ArenaError),
}

/// What the driver should do with a line of input.
#[derive(Debug, Clone, PartialEq)]
pub enum InputAction {
    Command(PlayerCommand),
    /// Print the latest snapshot summary.
    Status,
    Quit,
}

fn number<T: FromStr>(
    token: Option<&str>,
    command: &'static str,
    expected: &'static str,
) -> Result<T, InputError> {
    token
        .and_then(|t| t.parse().ok())
        .ok_or(InputError::BadArguments { command, expected })
}

fn parse_weapon(token: &str) -> Result<WeaponId, InputError> {
    match token.parse::<u8>() {
        Ok(slot) => Ok(WeaponId::from_slot(slot)?),
        Err(_) => Ok(token.parse::<WeaponId>()?),
    }
}

/// Parse one input line. Blank lines are `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<InputAction>, InputError> {
    // A bare space is the fire key.
    if line == " " {
        return Ok(Some(InputAction::Command(PlayerCommand::Fire)));
    }

    let mut tokens = line.split_whitespace();
    let Some(head) = tokens.next() else {
        return Ok(None);
    };
    let head = head.to_ascii_lowercase();

    let command = match head.as_str() {
        "w" => PlayerCommand::MoveDirection { dx: 0.0, dz: -1.0 },
        "s" => PlayerCommand::MoveDirection { dx: 0.0, dz: 1.0 },
        "a" => PlayerCommand::MoveDirection { dx: -1.0, dz: 0.0 },
        "d" => PlayerCommand::MoveDirection { dx: 1.0, dz: 0.0 },
        "f" | "fire" => PlayerCommand::Fire,
        "1" | "2" => PlayerCommand::SwitchWeapon {
            weapon: parse_weapon(&head)?,
        },
        "move" => PlayerCommand::MoveDirection {
            dx: number(tokens.next(), "move", "<dx> <dz>")?,
            dz: number(tokens.next(), "move", "<dx> <dz>")?,
        },
        "aim" => {
            let expected = "<x> <y> <z>";
            PlayerCommand::Aim {
                direction: Vector3::new(
                    number(tokens.next(), "aim", expected)?,
                    number(tokens.next(), "aim", expected)?,
                    number(tokens.next(), "aim", expected)?,
                ),
            }
        }
        "weapon" => {
            let token = tokens.next().ok_or(InputError::BadArguments {
                command: "weapon",
                expected: "<slot|name>",
            })?;
            PlayerCommand::SwitchWeapon {
                weapon: parse_weapon(token)?,
            }
        }
        "collect" => PlayerCommand::CollectPowerup {
            powerup_id: EntityId(number(tokens.next(), "collect", "<powerup id>")?),
        },
        "start" => PlayerCommand::Start,
        "restart" => PlayerCommand::Restart,
        "continue" => PlayerCommand::Continue,
        "menu" => PlayerCommand::ReturnToMenu,
        "status" => return Ok(Some(InputAction::Status)),
        "quit" | "exit" | "q" => return Ok(Some(InputAction::Quit)),
        _ => return Err(InputError::Unknown(line.trim().to_string())),
    };

    command.validate()?;
    Ok(Some(InputAction::Command(command)))
}
