//! Single guarded transition evaluation.

use crate::builder::StateMachine;
use crate::core::{display_name, EventId, NamedEntity, StateId};
use crate::effects::error::EvaluationError;
use tracing::debug;

impl StateMachine {
    /// Evaluate an event's guard against the machine's live counters.
    pub fn evaluate_guard(&self, event: EventId) -> Result<bool, EvaluationError> {
        let event = self
            .event(event)
            .ok_or(EvaluationError::UnknownEvent { event })?;
        event.evaluate_guard(&self.counters)
    }

    /// Apply an event's effect to the machine's counters.
    pub fn apply_effect(&mut self, event: EventId) -> Result<(), EvaluationError> {
        let handler = self
            .event(event)
            .ok_or(EvaluationError::UnknownEvent { event })?
            .clone();
        handler.apply_effect(&mut self.counters)
    }

    /// Evaluate one guarded transition.
    ///
    /// Takes the first transition leaving `source` on `event`, in
    /// declaration order. If the event's guard holds, the effect is applied
    /// and the target is returned. Returns `Ok(None)` when no transition
    /// matches or the guard is closed; counters are then left untouched.
    ///
    /// # Example
    ///
    /// ```rust
    /// use statekit::builder::build_state_machine;
    /// use statekit::core::NamedEntity;
    ///
    /// let mut machine = build_state_machine(|m| {
    ///     let presses = m.declare_counter(|c| {
    ///         c.name("presses");
    ///     })?;
    ///     let idle = m.declare_state(|s| {
    ///         s.initial().name("idle");
    ///     })?;
    ///     let press = m.declare_event(|e| {
    ///         e.name("press")
    ///             .guard(move |c| Ok(c.value(presses)? < 1))
    ///             .effect(move |c| c.increment(presses, 1).map(|_| ()));
    ///     })?;
    ///     m.declare_transitions(|t| {
    ///         t.from(idle, |p| {
    ///             p.on(press).to(idle);
    ///         });
    ///     })?;
    ///     Ok(())
    /// })
    /// .unwrap();
    ///
    /// let idle = machine.find_state("idle").unwrap();
    /// let press = machine.find_event("press").unwrap();
    ///
    /// assert_eq!(machine.fire(idle, press).unwrap(), Some(idle));
    /// assert_eq!(machine.fire(idle, press).unwrap(), None);
    /// ```
    pub fn fire(
        &mut self,
        source: StateId,
        event: EventId,
    ) -> Result<Option<StateId>, EvaluationError> {
        if self.state(source).is_none() {
            return Err(EvaluationError::UnknownState { state: source });
        }
        let handler = self
            .event(event)
            .ok_or(EvaluationError::UnknownEvent { event })?
            .clone();

        let Some(transition) = self
            .transitions()
            .iter()
            .find(|t| t.leaves(source, event))
            .copied()
        else {
            debug!(
                source = %source,
                event = display_name(handler.identifier()),
                "no transition for event"
            );
            return Ok(None);
        };

        if !handler.evaluate_guard(&self.counters)? {
            debug!(
                source = %source,
                event = display_name(handler.identifier()),
                "guard blocked transition"
            );
            return Ok(None);
        }

        handler.apply_effect(&mut self.counters)?;
        debug!(
            source = %source,
            event = display_name(handler.identifier()),
            target = %transition.target(),
            "transition fired"
        );
        Ok(Some(transition.target()))
    }
}
