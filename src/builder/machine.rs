//! The state machine aggregate and the builder that declares it.

use crate::builder::error::BuildError;
use crate::builder::transition::{Scope, Transitions};
use crate::core::{
    display_name, Counter, CounterId, CounterSet, Event, EventId, MachineTag, NamedEntity, State,
    StateId, Transition, TransitionDisplay,
};
use std::fmt;
use tracing::{debug, warn};

/// A finite state machine assembled from declarations.
///
/// The machine owns its states, events, and counters; transitions and
/// closures refer to them through handles. Build one with
/// [`build_state_machine`](crate::builder::build_state_machine); once built
/// its structure is fixed.
///
/// A machine cannot be duplicated, so a handle always names exactly one
/// machine:
///
/// ```compile_fail
/// use statekit::StateMachine;
///
/// let machine = statekit::build_state_machine(|_| Ok(())).unwrap();
/// let copy: StateMachine = machine.clone();
/// ```
///
/// Declarations are only available inside the build block:
///
/// ```compile_fail
/// use statekit::core::NamedEntity;
///
/// let mut machine = statekit::build_state_machine(|_| Ok(())).unwrap();
/// machine.declare_state(|s| {
///     s.initial().name("late");
/// });
/// ```
pub struct StateMachine {
    tag: MachineTag,
    initial_state: Option<StateId>,
    states: Vec<State>,
    events: Vec<Event>,
    pub(crate) counters: CounterSet,
    transitions: Vec<Transition>,
}

/// The declaration side of a machine under construction.
///
/// Only [`build_state_machine`](crate::builder::build_state_machine) creates
/// one, and it hands out the finished [`StateMachine`] when the block
/// returns.
pub struct StateMachineBuilder {
    machine: StateMachine,
}

impl StateMachineBuilder {
    pub(crate) fn new() -> Self {
        let tag = MachineTag::generate();
        Self {
            machine: StateMachine {
                tag,
                initial_state: None,
                states: Vec::new(),
                events: Vec::new(),
                counters: CounterSet::new(tag),
                transitions: Vec::new(),
            },
        }
    }

    /// The machine as declared so far.
    pub fn machine(&self) -> &StateMachine {
        &self.machine
    }

    pub(crate) fn finish(self) -> StateMachine {
        self.machine
    }

    /// Declare a state configured by `block`.
    ///
    /// If the block marks the state initial it becomes the machine's
    /// initial state, replacing any state declared initial before it.
    pub fn declare_state<F>(&mut self, block: F) -> Result<StateId, BuildError>
    where
        F: FnOnce(&mut State),
    {
        let mut state = State::new();
        block(&mut state);
        ensure_named_once(&state)?;

        let id = StateId::new(self.machine.tag, self.machine.states.len());
        if state.is_initial() {
            if let Some(previous) = self.machine.initial_state.replace(id) {
                let replaced = &mut self.machine.states[previous.index()];
                warn!(
                    previous = display_name(replaced.identifier()),
                    current = display_name(state.identifier()),
                    "initial state replaced"
                );
                replaced.clear_initial();
            }
        }

        debug!(
            state = %id,
            name = display_name(state.identifier()),
            initial = state.is_initial(),
            commands = state.commands().len(),
            "state declared"
        );
        self.machine.states.push(state);
        Ok(id)
    }

    /// Declare a counter configured by `block`.
    pub fn declare_counter<F>(&mut self, block: F) -> Result<CounterId, BuildError>
    where
        F: FnOnce(&mut Counter),
    {
        let mut counter = Counter::new();
        block(&mut counter);
        ensure_named_once(&counter)?;

        debug!(
            name = display_name(counter.identifier()),
            value = counter.value(),
            "counter declared"
        );
        Ok(self.machine.counters.insert(counter))
    }

    /// Declare an event configured by `block`.
    pub fn declare_event<F>(&mut self, block: F) -> Result<EventId, BuildError>
    where
        F: FnOnce(&mut Event),
    {
        let mut event = Event::new();
        block(&mut event);
        ensure_named_once(&event)?;

        let id = EventId::new(self.machine.tag, self.machine.events.len());
        debug!(
            event = %id,
            name = display_name(event.identifier()),
            guard = event.has_guard(),
            effect = event.has_effect(),
            "event declared"
        );
        self.machine.events.push(event);
        Ok(id)
    }

    /// Declare the machine's transitions.
    ///
    /// The list produced by `block` replaces the current transition list.
    /// On error the current list is left as it was.
    pub fn declare_transitions<F>(&mut self, block: F) -> Result<&[Transition], BuildError>
    where
        F: FnOnce(&mut Transitions),
    {
        let mut transitions = Transitions::new(self.machine.scope());
        block(&mut transitions);
        let transitions = transitions.finish()?;

        if !self.machine.transitions.is_empty() {
            debug!(
                discarded = self.machine.transitions.len(),
                "previous transitions replaced"
            );
        }
        self.machine.transitions = transitions;
        Ok(&self.machine.transitions)
    }
}

impl StateMachine {
    fn scope(&self) -> Scope {
        Scope {
            tag: self.tag,
            states: self.states.len(),
            events: self.events.len(),
        }
    }

    pub fn tag(&self) -> MachineTag {
        self.tag
    }

    pub fn initial_state(&self) -> Option<StateId> {
        self.initial_state
    }

    pub fn state(&self, id: StateId) -> Option<&State> {
        (id.tag() == self.tag)
            .then(|| self.states.get(id.index()))
            .flatten()
    }

    pub fn event(&self, id: EventId) -> Option<&Event> {
        (id.tag() == self.tag)
            .then(|| self.events.get(id.index()))
            .flatten()
    }

    pub fn counter(&self, id: CounterId) -> Option<&Counter> {
        self.counters.get(id).ok()
    }

    /// The counter registry, as guards see it.
    pub fn counters(&self) -> &CounterSet {
        &self.counters
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Transitions in declaration order.
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Find the first state with this case-insensitive name.
    pub fn find_state(&self, name: &str) -> Option<StateId> {
        self.states
            .iter()
            .position(|state| state.has_name(name))
            .map(|index| StateId::new(self.tag, index))
    }

    /// Find the first event with this case-insensitive name.
    pub fn find_event(&self, name: &str) -> Option<EventId> {
        self.events
            .iter()
            .position(|event| event.has_name(name))
            .map(|index| EventId::new(self.tag, index))
    }

    /// Iterate state handles in declaration order.
    pub fn state_ids(&self) -> impl Iterator<Item = StateId> + '_ {
        (0..self.states.len()).map(move |index| StateId::new(self.tag, index))
    }

    /// Iterate event handles in declaration order.
    pub fn event_ids(&self) -> impl Iterator<Item = EventId> + '_ {
        (0..self.events.len()).map(move |index| EventId::new(self.tag, index))
    }

    /// Resolve a transition for display. `None` if it belongs elsewhere.
    pub fn display_transition(&self, transition: &Transition) -> Option<TransitionDisplay<'_>> {
        Some(TransitionDisplay {
            source: self.state(transition.source())?,
            trigger: self.event(transition.trigger())?,
            target: self.state(transition.target())?,
        })
    }
}

fn ensure_named_once<T: NamedEntity>(entity: &T) -> Result<(), BuildError> {
    match entity.naming().conflict() {
        Some((first, second)) => Err(BuildError::AlreadyNamed {
            kind: T::KIND,
            first: first.clone(),
            second: second.clone(),
        }),
        None => Ok(()),
    }
}

impl fmt::Display for StateMachine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StateMachine(initialState=")?;
        match self.initial_state.and_then(|id| self.state(id)) {
            Some(state) => write!(f, "{state}")?,
            None => f.write_str("null")?,
        }
        f.write_str(", transitions=[")?;
        for (i, transition) in self.transitions.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            if let Some(shown) = self.display_transition(transition) {
                write!(f, "{shown}")?;
            }
        }
        f.write_str("])")
    }
}

impl fmt::Debug for StateMachine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateMachine")
            .field("tag", &self.tag)
            .field("initial_state", &self.initial_state)
            .field("states", &self.states)
            .field("events", &self.events)
            .field("counters", &self.counters)
            .field("transitions", &self.transitions)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build_state_machine;

    #[test]
    fn single_initial_state_is_registered() {
        let mut builder = StateMachineBuilder::new();
        let idle = builder
            .declare_state(|s| {
                s.initial().name("idle");
            })
            .unwrap();
        builder
            .declare_state(|s| {
                s.name("active");
            })
            .unwrap();

        let machine = builder.finish();
        assert_eq!(machine.initial_state(), Some(idle));
        assert!(machine.state(idle).unwrap().is_initial());
    }

    #[test]
    fn last_initial_state_wins() {
        let mut builder = StateMachineBuilder::new();
        let first = builder
            .declare_state(|s| {
                s.initial().name("first");
            })
            .unwrap();
        let second = builder
            .declare_state(|s| {
                s.initial().name("second");
            })
            .unwrap();

        let machine = builder.machine();
        assert_eq!(machine.initial_state(), Some(second));
        assert!(!machine.state(first).unwrap().is_initial());
        assert!(machine.state(second).unwrap().is_initial());
    }

    #[test]
    fn machine_without_initial_state() {
        let mut builder = StateMachineBuilder::new();
        builder
            .declare_state(|s| {
                s.name("lonely");
            })
            .unwrap();

        let machine = builder.finish();
        assert_eq!(machine.initial_state(), None);
        assert_eq!(
            machine.to_string(),
            "StateMachine(initialState=null, transitions=[])"
        );
    }

    #[test]
    fn naming_twice_fails_the_declaration() {
        let mut builder = StateMachineBuilder::new();
        let result = builder.declare_event(|e| {
            e.name("go").name("stop");
        });

        assert!(matches!(
            result,
            Err(BuildError::AlreadyNamed { kind: crate::core::EntityKind::Event, .. })
        ));
        assert!(builder.machine().events().is_empty());
    }

    #[test]
    fn counters_are_registered() {
        let mut builder = StateMachineBuilder::new();
        let toggles = builder
            .declare_counter(|c| {
                c.name("toggles").initial_value(4);
            })
            .unwrap();

        let machine = builder.machine();
        assert_eq!(machine.counter(toggles).unwrap().value(), 4);
        assert_eq!(machine.counters().find("Toggles"), Some(toggles));
    }

    #[test]
    fn lookups_are_case_insensitive() {
        let mut builder = StateMachineBuilder::new();
        let idle = builder
            .declare_state(|s| {
                s.name("Idle");
            })
            .unwrap();
        let go = builder
            .declare_event(|e| {
                e.name("Go");
            })
            .unwrap();

        let machine = builder.finish();
        assert_eq!(machine.find_state("idle"), Some(idle));
        assert_eq!(machine.find_event("GO"), Some(go));
        assert_eq!(machine.find_state("missing"), None);
        assert_eq!(machine.state_ids().collect::<Vec<_>>(), vec![idle]);
        assert_eq!(machine.event_ids().collect::<Vec<_>>(), vec![go]);
    }

    #[test]
    fn handles_from_other_machines_do_not_resolve() {
        let mut a = StateMachineBuilder::new();
        let mut b = StateMachineBuilder::new();
        let in_a = a
            .declare_state(|s| {
                s.name("x");
            })
            .unwrap();
        b.declare_state(|s| {
            s.name("y");
        })
        .unwrap();

        assert!(a.machine().state(in_a).is_some());
        assert!(b.machine().state(in_a).is_none());
    }

    #[test]
    fn handle_at_a_shared_index_is_still_foreign() {
        let mut original = StateMachineBuilder::new();
        let mut other = StateMachineBuilder::new();
        for builder in [&mut original, &mut other] {
            builder
                .declare_state(|s| {
                    s.initial().name("a");
                })
                .unwrap();
        }
        let only_in_other = other
            .declare_state(|s| {
                s.name("onlyInOther");
            })
            .unwrap();
        original
            .declare_state(|s| {
                s.name("onlyInOriginal");
            })
            .unwrap();
        let a = original.machine().find_state("a").unwrap();
        let go = original
            .declare_event(|e| {
                e.name("go");
            })
            .unwrap();

        let result = original
            .declare_transitions(|t| {
                t.from(a, |p| {
                    p.on(go).to(only_in_other);
                });
            })
            .map(|list| list.len());

        assert_eq!(
            result,
            Err(BuildError::ForeignHandle {
                handle: only_in_other.to_string(),
                owner: other.machine().tag(),
                machine: original.machine().tag(),
            })
        );
        assert!(original.machine().transitions().is_empty());
    }

    #[test]
    fn failed_transitions_block_keeps_previous_list() {
        let mut other = StateMachineBuilder::new();
        let foreign = other
            .declare_state(|s| {
                s.name("elsewhere");
            })
            .unwrap();

        let mut builder = StateMachineBuilder::new();
        let idle = builder
            .declare_state(|s| {
                s.initial().name("idle");
            })
            .unwrap();
        let go = builder
            .declare_event(|e| {
                e.name("go");
            })
            .unwrap();
        builder
            .declare_transitions(|t| {
                t.from(idle, |p| {
                    p.on(go).to(idle);
                });
            })
            .unwrap();

        let result = builder.declare_transitions(|t| {
            t.from(idle, |p| {
                p.on(go).to(foreign);
            });
        });

        assert!(matches!(result, Err(BuildError::ForeignHandle { .. })));
        assert_eq!(builder.machine().transitions().len(), 1);
    }

    #[test]
    fn display_lists_initial_state_and_transitions() {
        let machine = build_state_machine(|m| {
            let idle = m.declare_state(|s| {
                s.initial().name("idle").command("lockDoor");
            })?;
            let active = m.declare_state(|s| {
                s.name("active");
            })?;
            let go = m.declare_event(|e| {
                e.name("go");
            })?;
            m.declare_transitions(|t| {
                t.from(idle, |p| {
                    p.on(go).to(active);
                });
            })?;
            Ok(())
        })
        .unwrap();

        assert_eq!(
            machine.to_string(),
            "StateMachine(initialState=s(idle,cs([c(lockDoor)])), \
             transitions=[s(idle,cs([c(lockDoor)])) -e(go)-> s(active,cs([]))])"
        );
    }
}
