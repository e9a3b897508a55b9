//! Observable events emitted by the engine.

use serde::Serialize;

use super::{InputError, Player, Prompt, Verdict};
use crate::crypto::{Commitment, Reveal};
use crate::dice::{Die, ProbabilityTable};

/// Which decision a commitment round settles
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Round {
    FirstMover,
    Throw(Player),
}

/// Help shown in response to `?`
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum HelpTopic {
    /// How the current commit-reveal round works
    Rules(Prompt),
    /// Win probabilities for the dice on offer
    Probabilities(ProbabilityTable),
}

/// Something the user should see, in the order it happened
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum Event {
    /// A value in `[0, range)` was committed; only the digest is public
    Committed {
        round: Round,
        range: u32,
        commitment: Commitment,
    },
    /// The committed value and its key, published after the user answered
    Revealed { round: Round, reveal: Reveal },
    FirstMoverResolved { guess: u32, first_mover: Player },
    DieSelected { player: Player, index: usize, die: Die },
    Thrown {
        player: Player,
        contribution: u32,
        face_index: u32,
        value: i64,
    },
    Help(HelpTopic),
    InvalidInput(InputError),
    Finished(Verdict),
    Cancelled,
}
