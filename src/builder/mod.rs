//! Declarative construction of state machines.
//!
//! A machine is built by running one declaration block against a fresh
//! [`StateMachineBuilder`]. Inside the block, `declare_*` calls create and
//! register entities immediately, in statement order. The block's end is
//! the end of the declaration phase: the returned [`StateMachine`] has no
//! declaration API.

pub mod error;
pub mod machine;
pub mod transition;

pub use error::BuildError;
pub use machine::{StateMachine, StateMachineBuilder};
pub use transition::{EventToState, EventToStateSet, PendingPair, Transitions};

use tracing::debug;

/// Build a state machine from a declaration block.
///
/// Creates an empty machine, runs `block` against its builder, and hands the
/// finished machine to the caller. Any error returned from the block aborts
/// construction.
///
/// # Example
///
/// ```
/// use statekit::builder::build_state_machine;
/// use statekit::core::NamedEntity;
///
/// let machine = build_state_machine(|m| {
///     let idle = m.declare_state(|s| {
///         s.initial().name("idle");
///     })?;
///     let active = m.declare_state(|s| {
///         s.name("active");
///     })?;
///     let go = m.declare_event(|e| {
///         e.name("go");
///     })?;
///     m.declare_transitions(|t| {
///         t.from(idle, |p| {
///             p.on(go).to(active);
///         });
///     })?;
///     Ok(())
/// })
/// .unwrap();
///
/// let initial = machine.initial_state().unwrap();
/// assert_eq!(machine.state(initial).unwrap().name_str(), Some("idle"));
/// assert_eq!(machine.transitions().len(), 1);
/// ```
pub fn build_state_machine<F>(block: F) -> Result<StateMachine, BuildError>
where
    F: FnOnce(&mut StateMachineBuilder) -> Result<(), BuildError>,
{
    let mut builder = StateMachineBuilder::new();
    debug!(machine = %builder.machine().tag(), "building state machine");

    block(&mut builder)?;

    let machine = builder.finish();
    debug!(
        machine = %machine.tag(),
        states = machine.states().len(),
        events = machine.events().len(),
        counters = machine.counters().len(),
        transitions = machine.transitions().len(),
        "state machine built"
    );
    Ok(machine)
}
