//! States of a machine and the commands they emit.

use super::event::Command;
use super::named::{display_name, EntityKind, NamedEntity, Naming};
use std::fmt;

/// A named node of the state machine.
///
/// A state may be flagged initial and owns an ordered set of commands it
/// sends to the environment. Commands are unique by case-insensitive name.
///
/// # Example
///
/// ```rust
/// use statekit::core::{NamedEntity, State};
///
/// let mut state = State::new();
/// state
///     .name("unlockedPanel")
///     .command("unlockPanel")
///     .command("lockDoor");
///
/// assert_eq!(
///     state.to_string(),
///     "s(unlockedPanel,cs([c(unlockPanel), c(lockDoor)]))"
/// );
/// ```
#[derive(Clone, Debug, Default)]
pub struct State {
    naming: Naming,
    initial: bool,
    commands: Vec<Command>,
}

impl State {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark this state as the machine's entry state.
    pub fn initial(&mut self) -> &mut Self {
        self.initial = true;
        self
    }

    pub fn is_initial(&self) -> bool {
        self.initial
    }

    /// Add a command this state emits. A command with the same name is only
    /// kept once.
    pub fn command(&mut self, name: &str) -> &mut Self {
        if !self.commands.iter().any(|c| c.has_name(name)) {
            self.commands.push(Command::named(name));
        }
        self
    }

    /// Commands emitted by this state, in declaration order.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub(crate) fn clear_initial(&mut self) {
        self.initial = false;
    }
}

impl NamedEntity for State {
    const KIND: EntityKind = EntityKind::State;

    fn naming(&self) -> &Naming {
        &self.naming
    }

    fn naming_mut(&mut self) -> &mut Naming {
        &mut self.naming
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s({},cs([", display_name(self.identifier()))?;
        for (i, command) in self.commands.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{command}")?;
        }
        f.write_str("]))")
    }
}
