//! Transitions between states.

use super::event::Event;
use super::handle::{EventId, StateId};
use super::state::State;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An immutable `(source, trigger, target)` triple.
///
/// The endpoints and the trigger are handles into the owning machine; a
/// transition owns none of them. Several transitions may share one event,
/// and nothing prevents two transitions with the same source and trigger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transition {
    source: StateId,
    trigger: EventId,
    target: StateId,
}

impl Transition {
    pub(crate) fn new(source: StateId, trigger: EventId, target: StateId) -> Self {
        Self {
            source,
            trigger,
            target,
        }
    }

    pub fn source(&self) -> StateId {
        self.source
    }

    pub fn trigger(&self) -> EventId {
        self.trigger
    }

    pub fn target(&self) -> StateId {
        self.target
    }

    /// Whether this transition leaves `state` on `event`.
    pub fn leaves(&self, state: StateId, event: EventId) -> bool {
        self.source == state && self.trigger == event
    }
}

/// Display form of a transition with its endpoints resolved:
/// `<source> -<trigger>-> <target>`.
#[derive(Clone, Copy, Debug)]
pub struct TransitionDisplay<'a> {
    pub source: &'a State,
    pub trigger: &'a Event,
    pub target: &'a State,
}

impl fmt::Display for TransitionDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -{}-> {}", self.source, self.trigger, self.target)
    }
}
