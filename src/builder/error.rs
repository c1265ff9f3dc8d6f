//! Build errors for state machine declarations.

use crate::core::{EntityKind, EventId, Identifier, MachineTag, StateId};
use thiserror::Error;

/// Errors that abort a declaration.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BuildError {
    #[error("State {state} was never declared on this machine")]
    UnknownState { state: StateId },

    #[error("Event {event} was never declared on this machine")]
    UnknownEvent { event: EventId },

    #[error("{handle} belongs to machine {owner}, not to machine {machine}")]
    ForeignHandle {
        handle: String,
        owner: MachineTag,
        machine: MachineTag,
    },

    #[error("The {kind} '{first}' was named a second time as '{second}'")]
    AlreadyNamed {
        kind: EntityKind,
        first: Identifier,
        second: Identifier,
    },
}
