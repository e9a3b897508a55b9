//! JSON record of a session's revealed commitments.

use fair_dice_core::{DiceSet, Die, Event, Reveal, Round, SessionId, SessionOutcome};
use serde::Serialize;

/// One opened commitment and the user's answer to it
#[derive(Clone, Debug, Serialize)]
pub struct TranscriptRound {
    pub round: Round,
    pub reveal: Reveal,
    /// Guess bit for the first-mover round, added number for throws
    pub user_input: Option<u32>,
    pub verified: bool,
}

/// Everything a user needs to audit a finished session offline
#[derive(Clone, Debug, Serialize)]
pub struct Transcript {
    pub session_id: Option<SessionId>,
    pub dice: Vec<Die>,
    pub rounds: Vec<TranscriptRound>,
    pub outcome: Option<SessionOutcome>,
}

impl Transcript {
    pub fn new(dice: &DiceSet) -> Self {
        Self {
            session_id: None,
            dice: dice.iter().cloned().collect(),
            rounds: Vec::new(),
            outcome: None,
        }
    }

    /// Fold one engine event into the record
    pub fn record(&mut self, event: &Event) {
        match event {
            Event::Revealed { round, reveal } => self.rounds.push(TranscriptRound {
                round: *round,
                reveal: reveal.clone(),
                user_input: None,
                verified: reveal.verify(),
            }),
            Event::FirstMoverResolved { guess, .. } => self.set_last_input(*guess),
            Event::Thrown { contribution, .. } => self.set_last_input(*contribution),
            _ => {}
        }
    }

    /// Stamp the session id and how it ended
    pub fn finish(mut self, session_id: SessionId, outcome: &SessionOutcome) -> Self {
        self.session_id = Some(session_id);
        self.outcome = Some(outcome.clone());
        self
    }

    fn set_last_input(&mut self, value: u32) {
        if let Some(round) = self.rounds.last_mut() {
            round.user_input = Some(value);
        }
    }
}
