//! Completeness rules for a declared machine.

use crate::builder::StateMachine;
use crate::core::NamedEntity;
use crate::validation::violations::ModelViolation;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

type Check = Validation<(), NonEmptyVec<ModelViolation>>;

fn require(condition: bool, violation: impl FnOnce() -> ModelViolation) -> Check {
    if condition {
        Validation::success(())
    } else {
        Validation::fail(violation())
    }
}

impl StateMachine {
    /// Check the machine for completeness, accumulating ALL violations.
    ///
    /// Returns `Validation::Success(())` when every state, event, and
    /// counter is named and exactly one state is initial. Duplicate names
    /// and conflicting transitions are not violations.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<ModelViolation>> {
        let mut checks: Vec<Check> = Vec::new();

        for (id, state) in self.state_ids().zip(self.states()) {
            checks.push(require(state.is_named(), || ModelViolation::UnnamedState {
                state: id,
            }));
        }

        checks.push(require(self.initial_state().is_some(), || {
            ModelViolation::MissingInitialState
        }));

        for (id, event) in self.event_ids().zip(self.events()) {
            checks.push(require(event.is_named(), || ModelViolation::UnnamedEvent {
                event: id,
            }));
        }

        for (id, counter) in self.counters().iter() {
            checks.push(require(counter.is_named(), || {
                ModelViolation::UnnamedCounter { counter: id }
            }));
        }

        Validation::all_vec(checks).map(|_| ())
    }

    /// Whether [`validate`](Self::validate) finds nothing to report.
    pub fn is_complete(&self) -> bool {
        self.validate().is_success()
    }
}
