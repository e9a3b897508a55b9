//! Game engine: drives one session through the fair dice protocol.
//!
//! ```text
//! Init -> DetermineFirstMover -> SelectDice(first) -> SelectDice(second)
//!      -> ThrowUser -> ThrowComputer -> DetermineWinner -> Finished
//! ```
//!
//! Any interactive phase can move to `Cancelled` when the user exits.

use thiserror::Error;
use tracing::{debug, info, info_span};

use super::{
    Command, Console, Event, GameSession, HelpTopic, Phase, Player, Prompt, Round,
    SessionOutcome,
};
use crate::crypto::{FairRandom, RangeError};
use crate::dice::{DiceSet, ProbabilityTable, FACES};
use crate::entropy::Entropy;

/// Errors that abort a session
#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Range(#[from] RangeError),

    #[error("Console I/O failed: {0}")]
    Console(#[from] std::io::Error),

    #[error("Phase {0:?} reached without the state it needs")]
    OutOfOrder(Phase),
}

/// Runs a single session. Construct, `run`, drop.
pub struct GameEngine<E, C> {
    dice: DiceSet,
    entropy: E,
    console: C,
    session: GameSession,
}

impl<E: Entropy, C: Console> GameEngine<E, C> {
    pub fn new(dice: DiceSet, entropy: E, console: C) -> Self {
        Self {
            dice,
            entropy,
            console,
            session: GameSession::new(),
        }
    }

    /// Current session state
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn dice(&self) -> &DiceSet {
        &self.dice
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    /// Give back the console, e.g. to inspect what a scripted run recorded
    pub fn into_console(self) -> C {
        self.console
    }

    /// Advance until the session finishes or is cancelled
    pub fn run(&mut self) -> Result<SessionOutcome, GameError> {
        let span = info_span!("session", id = %self.session.id);
        let _guard = span.enter();

        while !self.session.phase.is_terminal() {
            self.advance()?;
        }

        match self.session.phase {
            Phase::Finished => self
                .session
                .verdict()
                .map(SessionOutcome::Completed)
                .ok_or(GameError::OutOfOrder(Phase::Finished)),
            _ => Ok(SessionOutcome::Cancelled),
        }
    }

    /// Execute the current phase and move to the next one.
    ///
    /// Terminal phases are left unchanged.
    pub fn advance(&mut self) -> Result<Phase, GameError> {
        let current = self.session.phase;
        let next = match current {
            Phase::Init => Phase::DetermineFirstMover,
            Phase::DetermineFirstMover => self.determine_first_mover()?,
            Phase::SelectDice(player) => self.select_die(player)?,
            Phase::ThrowUser => self.throw(Player::User)?,
            Phase::ThrowComputer => self.throw(Player::Computer)?,
            Phase::DetermineWinner => self.determine_winner()?,
            Phase::Finished | Phase::Cancelled => current,
        };

        if next != current {
            debug!(from = ?current, to = ?next, "phase transition");
            if next == Phase::Cancelled {
                info!(phase = ?current, "session cancelled by user");
                self.console.emit(Event::Cancelled)?;
            }
        }
        self.session.phase = next;
        Ok(next)
    }

    fn determine_first_mover(&mut self) -> Result<Phase, GameError> {
        let generator = FairRandom::commit(2, &mut self.entropy)?;
        self.announce_commitment(Round::FirstMover, &generator)?;

        let Some(guess) = self.ask(Prompt::GuessFirstMover)? else {
            return Ok(Phase::Cancelled);
        };

        let reveal = generator.reveal();
        let first_mover = if reveal.value == guess {
            Player::User
        } else {
            Player::Computer
        };
        self.console.emit(Event::Revealed {
            round: Round::FirstMover,
            reveal,
        })?;
        self.console
            .emit(Event::FirstMoverResolved { guess, first_mover })?;
        info!(%first_mover, "first mover resolved");

        self.session.first_mover = Some(first_mover);
        Ok(Phase::SelectDice(first_mover))
    }

    fn select_die(&mut self, player: Player) -> Result<Phase, GameError> {
        let taken = self.session.taken_by_opponent(player);
        let index = match player {
            Player::Computer => {
                let available = self.dice.available(taken);
                let position = self.entropy.pick(available.len());
                available[position]
            }
            Player::User => {
                let prompt = Prompt::SelectDie {
                    count: self.dice.len(),
                    taken,
                };
                match self.ask(prompt)? {
                    Some(index) => index as usize,
                    None => return Ok(Phase::Cancelled),
                }
            }
        };
        debug_assert_ne!(Some(index), taken);

        let die = self
            .dice
            .get(index)
            .cloned()
            .ok_or(GameError::OutOfOrder(Phase::SelectDice(player)))?;
        info!(%player, index, %die, "die selected");
        self.session.set_die(player, index);
        self.console.emit(Event::DieSelected { player, index, die })?;

        let first_mover = self
            .session
            .first_mover
            .ok_or(GameError::OutOfOrder(Phase::SelectDice(player)))?;
        Ok(if player == first_mover {
            Phase::SelectDice(player.opponent())
        } else {
            Phase::ThrowUser
        })
    }

    fn throw(&mut self, player: Player) -> Result<Phase, GameError> {
        let phase = self.session.phase;
        let die = self
            .session
            .die_of(player)
            .and_then(|index| self.dice.get(index))
            .cloned()
            .ok_or(GameError::OutOfOrder(phase))?;

        let range = FACES as u32;
        let generator = FairRandom::commit(range, &mut self.entropy)?;
        let round = Round::Throw(player);
        self.announce_commitment(round, &generator)?;

        let Some(contribution) = self.ask(Prompt::Contribute { player, range })? else {
            return Ok(Phase::Cancelled);
        };

        let reveal = generator.reveal();
        let face_index = reveal.combine(contribution);
        let value = die.face(face_index as usize);
        self.console.emit(Event::Revealed { round, reveal })?;
        self.console.emit(Event::Thrown {
            player,
            contribution,
            face_index,
            value,
        })?;
        info!(%player, face_index, value, "throw resolved");

        self.session.set_throw(player, value);
        Ok(match player {
            Player::User => Phase::ThrowComputer,
            Player::Computer => Phase::DetermineWinner,
        })
    }

    fn determine_winner(&mut self) -> Result<Phase, GameError> {
        let verdict = self
            .session
            .verdict()
            .ok_or(GameError::OutOfOrder(Phase::DetermineWinner))?;
        info!(
            user = verdict.user_throw,
            computer = verdict.computer_throw,
            outcome = %verdict.outcome,
            "session finished"
        );
        self.console.emit(Event::Finished(verdict))?;
        Ok(Phase::Finished)
    }

    fn announce_commitment(
        &mut self,
        round: Round,
        generator: &FairRandom,
    ) -> Result<(), GameError> {
        debug!(?round, commitment = %generator.commitment(), "committed");
        self.console.emit(Event::Committed {
            round,
            range: generator.range(),
            commitment: *generator.commitment(),
        })?;
        Ok(())
    }

    /// Ask until the reply is a valid choice (`Some`) or an exit (`None`)
    fn ask(&mut self, prompt: Prompt) -> Result<Option<u32>, GameError> {
        loop {
            let Some(line) = self.console.read(&prompt)? else {
                info!(?prompt, "input closed");
                return Ok(None);
            };
            match prompt.interpret(&line) {
                Ok(Command::Choose(value)) => return Ok(Some(value)),
                Ok(Command::Exit) => return Ok(None),
                Ok(Command::Help) => {
                    let topic = self.help_for(&prompt);
                    self.console.emit(Event::Help(topic))?;
                }
                Err(err) => {
                    debug!(%err, "invalid input");
                    self.console.emit(Event::InvalidInput(err))?;
                }
            }
        }
    }

    fn help_for(&self, prompt: &Prompt) -> HelpTopic {
        match prompt {
            Prompt::SelectDie { .. } => {
                HelpTopic::Probabilities(ProbabilityTable::build(&self.dice))
            }
            _ => HelpTopic::Rules(prompt.clone()),
        }
    }
}
