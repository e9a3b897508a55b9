//! Interactive I/O seam between the engine and its front end.

use std::collections::VecDeque;
use std::io;

use super::{Event, Prompt};

/// Trait for the engine's interactive I/O
///
/// The engine never formats text. It emits [`Event`]s and asks for one raw
/// line per [`Prompt`]; rendering belongs to the implementation.
pub trait Console {
    /// Show an event
    fn emit(&mut self, event: Event) -> io::Result<()>;

    /// Block for one line of input. `Ok(None)` means input is closed.
    fn read(&mut self, prompt: &Prompt) -> io::Result<Option<String>>;
}

impl<C: Console + ?Sized> Console for &mut C {
    fn emit(&mut self, event: Event) -> io::Result<()> {
        (**self).emit(event)
    }

    fn read(&mut self, prompt: &Prompt) -> io::Result<Option<String>> {
        (**self).read(prompt)
    }
}

/// In-memory console that replays fixed input and records everything
#[derive(Clone, Debug, Default)]
pub struct ScriptedConsole {
    inputs: VecDeque<String>,
    events: Vec<Event>,
    prompts: Vec<Prompt>,
}

impl ScriptedConsole {
    /// Create a console that answers prompts with `inputs`, in order
    pub fn new<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            events: Vec::new(),
            prompts: Vec::new(),
        }
    }

    /// Events emitted so far
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Prompts issued so far, one per line read
    pub fn prompts(&self) -> &[Prompt] {
        &self.prompts
    }

    /// Lines not yet consumed
    pub fn remaining(&self) -> usize {
        self.inputs.len()
    }
}

impl Console for ScriptedConsole {
    fn emit(&mut self, event: Event) -> io::Result<()> {
        self.events.push(event);
        Ok(())
    }

    fn read(&mut self, prompt: &Prompt) -> io::Result<Option<String>> {
        self.prompts.push(prompt.clone());
        Ok(self.inputs.pop_front())
    }
}
