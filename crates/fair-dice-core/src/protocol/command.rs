//! Prompts and the commands they accept.
//!
//! Every prompt accepts the same three kinds of token: a number valid for that
//! prompt, `X`/`x` to exit, and `?` for help. Anything else is an
//! [`InputError`] and the prompt is asked again.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Player;

/// Rejected interactive input. Always recoverable.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum InputError {
    #[error("Expected a number, `?` or `X`, got {0:?}")]
    NotANumber(String),

    #[error("{value} is out of range 0..={max}")]
    OutOfRange { value: u32, max: u32 },

    #[error("Die {0} is already taken")]
    DieTaken(u32),
}

/// A parsed, validated reply to a prompt
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Choose(u32),
    Help,
    Exit,
}

/// What the engine is waiting for
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Prompt {
    /// Guess the committed bit, 0 or 1
    GuessFirstMover,
    /// Pick one of `count` dice, except `taken`
    SelectDie { count: usize, taken: Option<usize> },
    /// Add a number in `[0, range)` to the committed value for `player`'s throw
    Contribute { player: Player, range: u32 },
}

impl Prompt {
    /// Indices of dice that may be picked
    pub fn available(&self) -> Vec<usize> {
        match self {
            Prompt::SelectDie { count, taken } => {
                (0..*count).filter(|i| Some(*i) != *taken).collect()
            }
            _ => Vec::new(),
        }
    }

    /// Parse and validate one line of input for this prompt
    pub fn interpret(&self, line: &str) -> Result<Command, InputError> {
        let token = line.trim();
        match token {
            "X" | "x" => return Ok(Command::Exit),
            "?" => return Ok(Command::Help),
            _ => {}
        }
        let value: u32 = token
            .parse()
            .map_err(|_| InputError::NotANumber(token.to_string()))?;

        match self {
            Prompt::GuessFirstMover => check_below(value, 2)?,
            Prompt::SelectDie { count, taken } => {
                check_below(value, u32::try_from(*count).unwrap_or(u32::MAX))?;
                if *taken == Some(value as usize) {
                    return Err(InputError::DieTaken(value));
                }
            }
            Prompt::Contribute { range, .. } => check_below(value, *range)?,
        }
        Ok(Command::Choose(value))
    }
}

fn check_below(value: u32, bound: u32) -> Result<(), InputError> {
    if value < bound {
        Ok(())
    } else {
        Err(InputError::OutOfRange {
            value,
            max: bound.saturating_sub(1),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_and_help_everywhere() {
        let prompts = [
            Prompt::GuessFirstMover,
            Prompt::SelectDie {
                count: 3,
                taken: Some(0),
            },
            Prompt::Contribute {
                player: Player::User,
                range: 6,
            },
        ];
        for prompt in &prompts {
            assert_eq!(prompt.interpret("x"), Ok(Command::Exit));
            assert_eq!(prompt.interpret(" X\n"), Ok(Command::Exit));
            assert_eq!(prompt.interpret("?"), Ok(Command::Help));
        }
    }

    #[test]
    fn test_guess_accepts_bits_only() {
        let prompt = Prompt::GuessFirstMover;
        assert_eq!(prompt.interpret("0"), Ok(Command::Choose(0)));
        assert_eq!(prompt.interpret("1\n"), Ok(Command::Choose(1)));
        assert_eq!(
            prompt.interpret("2"),
            Err(InputError::OutOfRange { value: 2, max: 1 })
        );
    }

    #[test]
    fn test_non_numeric_rejected() {
        let prompt = Prompt::GuessFirstMover;
        assert_eq!(
            prompt.interpret("heads"),
            Err(InputError::NotANumber("heads".to_string()))
        );
        assert_eq!(
            prompt.interpret("-1"),
            Err(InputError::NotANumber("-1".to_string()))
        );
        assert_eq!(
            prompt.interpret(""),
            Err(InputError::NotANumber(String::new()))
        );
    }

    #[test]
    fn test_select_die_rejects_taken_and_unknown() {
        let prompt = Prompt::SelectDie {
            count: 3,
            taken: Some(1),
        };
        assert_eq!(prompt.available(), vec![0, 2]);
        assert_eq!(prompt.interpret("2"), Ok(Command::Choose(2)));
        assert_eq!(prompt.interpret("1"), Err(InputError::DieTaken(1)));
        assert_eq!(
            prompt.interpret("3"),
            Err(InputError::OutOfRange { value: 3, max: 2 })
        );
    }

    #[test]
    fn test_contribution_bounds() {
        let prompt = Prompt::Contribute {
            player: Player::Computer,
            range: 6,
        };
        assert_eq!(prompt.interpret("5"), Ok(Command::Choose(5)));
        assert_eq!(
            prompt.interpret("6"),
            Err(InputError::OutOfRange { value: 6, max: 5 })
        );
    }
}
