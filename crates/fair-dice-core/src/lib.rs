//! Fair Dice Core Library
//!
//! This crate provides the commit-reveal randomness primitive, the dice model
//! with its win-probability calculator, and the game engine that drives a
//! verifiably fair two-party dice game between a user and the computer.

pub mod crypto;
pub mod dice;
pub mod entropy;
pub mod protocol;

pub use crypto::{Commitment, FairRandom, RangeError, Reveal, SecretKey, VerifyError};
pub use dice::{ConfigError, DiceSet, Die, DieError, ProbabilityTable};
pub use entropy::{Entropy, RngEntropy, ScriptedEntropy};
pub use protocol::{
    Command, Console, Event, GameEngine, GameError, GameSession, HelpTopic, InputError, Outcome,
    Phase, Player, Prompt, Round, ScriptedConsole, SessionId, SessionOutcome, Verdict,
};
