//! Events that trigger transitions and commands that states emit.

use super::counter::CounterSet;
use super::named::{display_name, EntityKind, NamedEntity, Naming};
use crate::effects::EvaluationError;
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// Predicate over counters deciding whether an event may fire.
pub type GuardFn = Arc<dyn Fn(&CounterSet) -> Result<bool, EvaluationError> + Send + Sync>;

/// Counter mutation applied after an event's transition fires.
pub type EffectFn = Arc<dyn Fn(&mut CounterSet) -> Result<(), EvaluationError> + Send + Sync>;

/// A named environment event that triggers transitions.
///
/// The guard defaults to always-true and the effect to a no-op. Both are
/// stored, not run, when declared.
///
/// # Example
///
/// ```rust
/// use statekit::builder::build_state_machine;
/// use statekit::core::NamedEntity;
///
/// let machine = build_state_machine(|m| {
///     let toggles = m.declare_counter(|c| {
///         c.name("toggles");
///     })?;
///     m.declare_event(|e| {
///         e.name("toggleLight")
///             .guard(move |counters| Ok(*counters.get(toggles)? < 3))
///             .effect(move |counters| counters.increment(toggles, 1).map(|_| ()));
///     })?;
///     Ok(())
/// })
/// .unwrap();
///
/// assert_eq!(machine.events().len(), 1);
/// ```
#[derive(Clone, Default)]
pub struct Event {
    naming: Naming,
    guard: Option<GuardFn>,
    effect: Option<EffectFn>,
}

impl Event {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the guard.
    pub fn guard<F>(&mut self, predicate: F) -> &mut Self
    where
        F: Fn(&CounterSet) -> Result<bool, EvaluationError> + Send + Sync + 'static,
    {
        self.guard = Some(Arc::new(predicate));
        self
    }

    /// Replace the effect.
    pub fn effect<F>(&mut self, action: F) -> &mut Self
    where
        F: Fn(&mut CounterSet) -> Result<(), EvaluationError> + Send + Sync + 'static,
    {
        self.effect = Some(Arc::new(action));
        self
    }

    pub fn has_guard(&self) -> bool {
        self.guard.is_some()
    }

    pub fn has_effect(&self) -> bool {
        self.effect.is_some()
    }

    /// Run the guard against the current counter values.
    ///
    /// Errors raised by the guard are returned unchanged.
    pub fn evaluate_guard(&self, counters: &CounterSet) -> Result<bool, EvaluationError> {
        let allowed = match &self.guard {
            Some(guard) => guard(counters)?,
            None => true,
        };
        trace!(event = display_name(self.identifier()), allowed, "guard evaluated");
        Ok(allowed)
    }

    /// Run the effect, mutating the counters it names.
    pub fn apply_effect(&self, counters: &mut CounterSet) -> Result<(), EvaluationError> {
        if let Some(effect) = &self.effect {
            effect(counters)?;
            trace!(event = display_name(self.identifier()), "effect applied");
        }
        Ok(())
    }
}

impl NamedEntity for Event {
    const KIND: EntityKind = EntityKind::Event;

    fn naming(&self) -> &Naming {
        &self.naming
    }

    fn naming_mut(&mut self) -> &mut Naming {
        &mut self.naming
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e({})", display_name(self.identifier()))
    }
}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("name", &self.identifier())
            .field("guard", &self.has_guard())
            .field("effect", &self.has_effect())
            .finish()
    }
}

/// A named signal a state sends to the environment.
#[derive(Clone, Debug, Default)]
pub struct Command {
    naming: Naming,
}

impl Command {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn named(name: &str) -> Self {
        Self {
            naming: Naming::named(name),
        }
    }
}

impl NamedEntity for Command {
    const KIND: EntityKind = EntityKind::Command;

    fn naming(&self) -> &Naming {
        &self.naming
    }

    fn naming_mut(&mut self) -> &mut Naming {
        &mut self.naming
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c({})", display_name(self.identifier()))
    }
}
