//! Dice definitions and win probabilities.

mod die;
mod probability;

pub use die::{ConfigError, DiceSet, Die, DieError, FACES, MIN_DICE};
pub use probability::{tie_fraction, ties, win_probability, wins, ProbabilityTable};
