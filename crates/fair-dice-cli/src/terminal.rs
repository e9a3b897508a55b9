//! Text front end for the engine's events and prompts.

use fair_dice_core::{
    dice::FACES, Console, DiceSet, Event, HelpTopic, Outcome, Player, ProbabilityTable, Prompt,
    Reveal, Round,
};
use std::io::{self, BufRead, Write};

use crate::transcript::Transcript;

/// Console over a line-oriented reader and a writer
pub struct TerminalConsole<R, W> {
    dice: DiceSet,
    input: R,
    output: W,
    last_reveal: Option<Reveal>,
    transcript: Transcript,
}

impl<R: BufRead, W: Write> TerminalConsole<R, W> {
    pub fn new(dice: DiceSet, input: R, output: W) -> Self {
        let transcript = Transcript::new(&dice);
        Self {
            dice,
            input,
            output,
            last_reveal: None,
            transcript,
        }
    }

    /// Everything recorded during the session
    pub fn into_transcript(self) -> Transcript {
        self.transcript
    }

    fn render(&mut self, event: &Event) -> io::Result<()> {
        let out = &mut self.output;
        match event {
            Event::Committed {
                round,
                range,
                commitment,
            } => {
                match round {
                    Round::FirstMover => writeln!(out, "Let's determine who makes the first move.")?,
                    Round::Throw(Player::User) => writeln!(out, "It's time for your throw.")?,
                    Round::Throw(Player::Computer) => writeln!(out, "It's time for my throw.")?,
                }
                writeln!(
                    out,
                    "I selected a random value in the range 0..{} (HMAC={}).",
                    range - 1,
                    commitment
                )?;
            }
            Event::Revealed { reveal, .. } => {
                writeln!(out, "My number is {} (KEY={}).", reveal.value, reveal.key)?;
                self.last_reveal = Some(reveal.clone());
            }
            Event::FirstMoverResolved { first_mover, .. } => match first_mover {
                Player::User => writeln!(out, "You guessed right, you make the first move.")?,
                Player::Computer => writeln!(out, "Wrong guess, I make the first move.")?,
            },
            Event::DieSelected { player, die, .. } => match player {
                Player::User => writeln!(out, "You choose the [{}] dice.", die)?,
                Player::Computer => writeln!(out, "I choose the [{}] dice.", die)?,
            },
            Event::Thrown {
                player,
                contribution,
                face_index,
                value,
            } => {
                if let Some(reveal) = self.last_reveal.take() {
                    writeln!(
                        out,
                        "The fair result is {} + {} = {} (mod {}).",
                        reveal.value, contribution, face_index, reveal.range
                    )?;
                }
                match player {
                    Player::User => writeln!(out, "Your throw is {}.", value)?,
                    Player::Computer => writeln!(out, "My throw is {}.", value)?,
                }
            }
            Event::Help(HelpTopic::Rules(prompt)) => write_rules(out, prompt)?,
            Event::Help(HelpTopic::Probabilities(table)) => write_table(out, table)?,
            Event::InvalidInput(err) => writeln!(out, "Invalid input: {}. Try again.", err)?,
            Event::Finished(verdict) => match verdict.outcome {
                Outcome::UserWins => writeln!(
                    out,
                    "You win ({} > {})!",
                    verdict.user_throw, verdict.computer_throw
                )?,
                Outcome::ComputerWins => writeln!(
                    out,
                    "I win ({} > {})!",
                    verdict.computer_throw, verdict.user_throw
                )?,
                Outcome::Tie => writeln!(
                    out,
                    "It's a tie ({} = {}).",
                    verdict.user_throw, verdict.computer_throw
                )?,
            },
            Event::Cancelled => writeln!(out, "Game cancelled.")?,
        }
        out.flush()
    }

    fn write_prompt(&mut self, prompt: &Prompt) -> io::Result<()> {
        let out = &mut self.output;
        match prompt {
            Prompt::GuessFirstMover => {
                writeln!(out, "Try to guess my selection.")?;
                for bit in 0..2 {
                    writeln!(out, "{} - {}", bit, bit)?;
                }
            }
            Prompt::SelectDie { .. } => {
                writeln!(out, "Choose your dice:")?;
                for index in prompt.available() {
                    if let Some(die) = self.dice.get(index) {
                        writeln!(out, "{} - {}", index, die)?;
                    }
                }
            }
            Prompt::Contribute { range, .. } => {
                writeln!(out, "Add your number modulo {}.", range)?;
                for n in 0..*range {
                    writeln!(out, "{} - {}", n, n)?;
                }
            }
        }
        writeln!(out, "X - exit")?;
        writeln!(out, "? - help")?;
        write!(out, "Your selection: ")?;
        out.flush()
    }
}

impl<R: BufRead, W: Write> Console for TerminalConsole<R, W> {
    fn emit(&mut self, event: Event) -> io::Result<()> {
        self.render(&event)?;
        self.transcript.record(&event);
        Ok(())
    }

    fn read(&mut self, prompt: &Prompt) -> io::Result<Option<String>> {
        self.write_prompt(prompt)?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line))
    }
}

fn write_rules<W: Write>(out: &mut W, prompt: &Prompt) -> io::Result<()> {
    match prompt {
        Prompt::GuessFirstMover => {
            writeln!(out, "I have committed to 0 or 1; the HMAC above locks my choice.")?;
            writeln!(out, "Guess it right and you pick your die first.")?;
        }
        Prompt::Contribute { range, .. } => {
            writeln!(
                out,
                "I have committed to a number in 0..{}; the HMAC above locks it.",
                range - 1
            )?;
            writeln!(
                out,
                "Your number is added to mine modulo {}, and the sum picks the face.",
                range
            )?;
            writeln!(out, "Neither of us can steer the sum alone.")?;
        }
        Prompt::SelectDie { .. } => {
            writeln!(out, "Pick a die that has not been taken.")?;
        }
    }
    writeln!(
        out,
        "After you answer I reveal my number and KEY so you can recompute HMAC-SHA3-256(KEY, number)."
    )
}

/// Render the win-probability matrix, user die on rows
pub fn write_table<W: Write>(out: &mut W, table: &ProbabilityTable) -> io::Result<()> {
    let labels: Vec<String> = table.dice.iter().map(ToString::to_string).collect();
    let width = labels
        .iter()
        .map(String::len)
        .max()
        .unwrap_or(0)
        .max("User dice v".len());

    writeln!(out, "Probability of the win for the user:")?;
    write!(out, "{:<width$}", "User dice v", width = width)?;
    for label in &labels {
        write!(out, " | {:^width$}", label, width = width)?;
    }
    writeln!(out)?;
    let rule = "-".repeat(width + labels.len() * (width + 3));
    writeln!(out, "{}", rule)?;
    for (row, label) in labels.iter().enumerate() {
        write!(out, "{:<width$}", label, width = width)?;
        for col in 0..labels.len() {
            let cell = table
                .get(row, col)
                .map(|p| format!("{:.2}", p))
                .unwrap_or_default();
            let cell = if row == col { format!("- ({})", cell) } else { cell };
            write!(out, " | {:^width$}", cell, width = width)?;
        }
        writeln!(out)?;
    }
    writeln!(
        out,
        "Each cell counts the {} face pairs where the row die rolls higher.",
        FACES * FACES
    )
}
