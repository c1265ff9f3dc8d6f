//! Statekit: a declarative builder DSL for finite state machines
//!
//! A machine is declared in one block: states (one of them initial, each
//! optionally emitting commands), counters, events guarded by counter
//! predicates and carrying counter effects, and transitions grouped by
//! source state.
//!
//! # Core Concepts
//!
//! - **Identifiers**: case-insensitive names shared by every entity
//! - **Handles**: `StateId`, `EventId`, and `CounterId` refer into the
//!   machine that issued them
//! - **Guards and effects**: closures over the machine's counter registry,
//!   evaluated against live values
//! - **Validation**: accumulate every completeness problem in one pass
//!
//! # Example
//!
//! ```rust
//! use statekit::builder::build_state_machine;
//! use statekit::core::NamedEntity;
//!
//! let mut machine = build_state_machine(|m| {
//!     let toggles = m.declare_counter(|c| {
//!         c.name("toggles").initial_value(0);
//!     })?;
//!     let idle = m.declare_state(|s| {
//!         s.initial().name("idle");
//!     })?;
//!     let active = m.declare_state(|s| {
//!         s.name("active").command("unlockPanel");
//!     })?;
//!     let toggle = m.declare_event(|e| {
//!         e.name("toggleLight")
//!             .guard(move |c| Ok(*c.get(toggles)? < 3))
//!             .effect(move |c| c.increment(toggles, 1).map(|_| ()));
//!     })?;
//!     m.declare_transitions(|t| {
//!         t.from(idle, |p| {
//!             p.on(toggle).to(active);
//!         });
//!     })?;
//!     Ok(())
//! })
//! .unwrap();
//!
//! let idle = machine.initial_state().unwrap();
//! let toggle = machine.find_event("TOGGLELIGHT").unwrap();
//! let next = machine.fire(idle, toggle).unwrap();
//!
//! assert_eq!(next, machine.find_state("active"));
//! assert_eq!(
//!     machine.to_string(),
//!     "StateMachine(initialState=s(idle,cs([])), \
//!      transitions=[s(idle,cs([])) -e(toggleLight)-> s(active,cs([c(unlockPanel)]))])"
//! );
//! ```

pub mod builder;
pub mod core;
pub mod effects;
pub mod snapshot;
pub mod validation;

// Re-export commonly used types
pub use crate::builder::{build_state_machine, BuildError, StateMachine, StateMachineBuilder};
pub use crate::core::{Counter, CounterId, Event, EventId, Identifier, NamedEntity, State, StateId};
pub use crate::effects::EvaluationError;
