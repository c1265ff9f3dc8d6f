//! Problems reported by whole-model validation.

use crate::core::{CounterId, EventId, StateId};
use thiserror::Error;

/// A reason a declared machine is not yet complete.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ModelViolation {
    #[error("State {state} was never named")]
    UnnamedState { state: StateId },

    #[error("Event {event} was never named")]
    UnnamedEvent { event: EventId },

    #[error("Counter {counter} was never named")]
    UnnamedCounter { counter: CounterId },

    #[error("No state is marked initial")]
    MissingInitialState,
}
