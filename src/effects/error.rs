//! Errors raised while evaluating guards and applying effects.

use crate::core::{CounterId, EventId, StateId};
use thiserror::Error;

/// Failures during guard evaluation, effect application, or firing.
///
/// Guards and effects return this type, so a caller-defined failure travels
/// back unchanged through [`Failed`](EvaluationError::Failed).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum EvaluationError {
    #[error("Counter {counter} is not part of this machine")]
    UnknownCounter { counter: CounterId },

    #[error("Counter {counter} overflowed when adding {delta}")]
    CounterOverflow { counter: CounterId, delta: i64 },

    #[error("Event {event} is not part of this machine")]
    UnknownEvent { event: EventId },

    #[error("State {state} is not part of this machine")]
    UnknownState { state: StateId },

    #[error("Guard or effect failed: {0}")]
    Failed(String),
}
