//! Protocol types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique session identifier
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Create a new random session ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl fmt::Debug for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionId({})", self.0)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Player identifier
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    User,
    Computer,
}

impl Player {
    /// Get the opponent
    pub fn opponent(&self) -> Player {
        match self {
            Player::User => Player::Computer,
            Player::Computer => Player::User,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::User => write!(f, "user"),
            Player::Computer => write!(f, "computer"),
        }
    }
}

/// Result of comparing the two throws
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    UserWins,
    ComputerWins,
    Tie,
}

impl Outcome {
    /// Strictly higher throw wins; equal throws tie
    pub fn decide(user_throw: i64, computer_throw: i64) -> Self {
        match user_throw.cmp(&computer_throw) {
            std::cmp::Ordering::Greater => Outcome::UserWins,
            std::cmp::Ordering::Less => Outcome::ComputerWins,
            std::cmp::Ordering::Equal => Outcome::Tie,
        }
    }

    /// The winning player, if any
    pub fn winner(&self) -> Option<Player> {
        match self {
            Outcome::UserWins => Some(Player::User),
            Outcome::ComputerWins => Some(Player::Computer),
            Outcome::Tie => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::UserWins => write!(f, "user wins"),
            Outcome::ComputerWins => write!(f, "computer wins"),
            Outcome::Tie => write!(f, "tie"),
        }
    }
}

/// Engine state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Init,
    DetermineFirstMover,
    /// The given player picks a die
    SelectDice(Player),
    ThrowUser,
    ThrowComputer,
    DetermineWinner,
    Finished,
    Cancelled,
}

impl Phase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Finished | Phase::Cancelled)
    }
}

/// Everything needed to announce the result of a completed session
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub first_mover: Player,
    pub user_die: usize,
    pub computer_die: usize,
    pub user_throw: i64,
    pub computer_throw: i64,
    pub outcome: Outcome,
}

/// How a session ended
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionOutcome {
    Completed(Verdict),
    /// The user exited before a winner was determined
    Cancelled,
}

/// Mutable state of one session. Only the engine writes to it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GameSession {
    pub id: SessionId,
    pub phase: Phase,
    pub first_mover: Option<Player>,
    pub user_die: Option<usize>,
    pub computer_die: Option<usize>,
    pub user_throw: Option<i64>,
    pub computer_throw: Option<i64>,
}

impl GameSession {
    pub fn new() -> Self {
        Self {
            id: SessionId::new(),
            phase: Phase::Init,
            first_mover: None,
            user_die: None,
            computer_die: None,
            user_throw: None,
            computer_throw: None,
        }
    }

    /// Die index chosen by `player`
    pub fn die_of(&self, player: Player) -> Option<usize> {
        match player {
            Player::User => self.user_die,
            Player::Computer => self.computer_die,
        }
    }

    /// Die index chosen by the other player, if any
    pub fn taken_by_opponent(&self, player: Player) -> Option<usize> {
        self.die_of(player.opponent())
    }

    pub(crate) fn set_die(&mut self, player: Player, index: usize) {
        match player {
            Player::User => self.user_die = Some(index),
            Player::Computer => self.computer_die = Some(index),
        }
    }

    pub(crate) fn set_throw(&mut self, player: Player, value: i64) {
        match player {
            Player::User => self.user_throw = Some(value),
            Player::Computer => self.computer_throw = Some(value),
        }
    }

    /// Assemble the verdict once every field is known
    pub fn verdict(&self) -> Option<Verdict> {
        let user_throw = self.user_throw?;
        let computer_throw = self.computer_throw?;
        Some(Verdict {
            first_mover: self.first_mover?,
            user_die: self.user_die?,
            computer_die: self.computer_die?,
            user_throw,
            computer_throw,
            outcome: Outcome::decide(user_throw, computer_throw),
        })
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}
