//! Core model types.
//!
//! This module contains the object graph a machine is built from:
//! - Case-insensitive identifiers and the shared naming capability
//! - Counters and the counter registry guards and effects work against
//! - Events, commands, states, and transitions
//! - Handles that tie each entity to the machine that owns it

mod counter;
mod event;
mod handle;
mod identifier;
mod named;
mod state;
mod transition;

pub use counter::{Counter, CounterSet};
pub use event::{Command, EffectFn, Event, GuardFn};
pub use handle::{CounterId, EventId, MachineTag, StateId};
pub use identifier::Identifier;
pub use named::{EntityKind, NamedEntity, Naming};
pub use state::State;
pub use transition::{Transition, TransitionDisplay};

pub(crate) use named::display_name;
