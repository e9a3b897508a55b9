//! Game protocol: session types, prompts, events, and the engine.

mod command;
mod console;
mod engine;
mod events;
mod types;

pub use command::{Command, InputError, Prompt};
pub use console::{Console, ScriptedConsole};
pub use engine::{GameEngine, GameError};
pub use events::{Event, HelpTopic, Round};
pub use types::{GameSession, Outcome, Phase, Player, SessionId, SessionOutcome, Verdict};
