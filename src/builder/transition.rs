//! Scoped builders for declaring transitions.
//!
//! A transitions block groups `event -> target` pairs under their source
//! state:
//!
//! ```rust
//! use statekit::builder::build_state_machine;
//! use statekit::core::NamedEntity;
//!
//! let machine = build_state_machine(|m| {
//!     let idle = m.declare_state(|s| {
//!         s.initial().name("idle");
//!     })?;
//!     let active = m.declare_state(|s| {
//!         s.name("active");
//!     })?;
//!     let go = m.declare_event(|e| {
//!         e.name("go");
//!     })?;
//!     let stop = m.declare_event(|e| {
//!         e.name("stop");
//!     })?;
//!
//!     m.declare_transitions(|t| {
//!         t.from(idle, |p| {
//!             p.on(go).to(active);
//!         });
//!         t.from(active, |p| {
//!             p.add(stop.leads_to(idle));
//!         });
//!     })?;
//!     Ok(())
//! })
//! .unwrap();
//!
//! assert_eq!(machine.transitions().len(), 2);
//! ```

use crate::builder::error::BuildError;
use crate::core::{EventId, MachineTag, StateId, Transition};
use tracing::debug;

/// An `event -> target` pair waiting for its source state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EventToState {
    pub event: EventId,
    pub target: StateId,
}

impl EventToState {
    pub fn new(event: EventId, target: StateId) -> Self {
        Self { event, target }
    }
}

impl EventId {
    /// Pair this event with the state it leads to.
    pub fn leads_to(self, target: StateId) -> EventToState {
        EventToState::new(self, target)
    }
}

/// The pairs declared under one source state, in declaration order.
#[derive(Clone, Debug, Default)]
pub struct EventToStateSet {
    pairs: Vec<EventToState>,
}

impl EventToStateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a pair built with [`EventId::leads_to`].
    pub fn add(&mut self, pair: EventToState) -> &mut Self {
        self.pairs.push(pair);
        self
    }

    /// Start a pair for `event`; finish it with [`PendingPair::to`].
    pub fn on(&mut self, event: EventId) -> PendingPair<'_> {
        PendingPair { set: self, event }
    }

    pub fn pairs(&self) -> &[EventToState] {
        &self.pairs
    }
}

/// An event waiting for its target state.
#[must_use = "a pair is only recorded once `to` is called"]
pub struct PendingPair<'a> {
    set: &'a mut EventToStateSet,
    event: EventId,
}

impl<'a> PendingPair<'a> {
    /// Record `event -> target` and return the set for further pairs.
    pub fn to(self, target: StateId) -> &'a mut EventToStateSet {
        self.set.add(EventToState::new(self.event, target))
    }
}

/// What a transitions block may legally refer to.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Scope {
    pub(crate) tag: MachineTag,
    pub(crate) states: usize,
    pub(crate) events: usize,
}

impl Scope {
    pub(crate) fn check_state(&self, state: StateId) -> Result<(), BuildError> {
        if state.tag() != self.tag {
            return Err(BuildError::ForeignHandle {
                handle: state.to_string(),
                owner: state.tag(),
                machine: self.tag,
            });
        }
        if state.index() >= self.states {
            return Err(BuildError::UnknownState { state });
        }
        Ok(())
    }

    pub(crate) fn check_event(&self, event: EventId) -> Result<(), BuildError> {
        if event.tag() != self.tag {
            return Err(BuildError::ForeignHandle {
                handle: event.to_string(),
                owner: event.tag(),
                machine: self.tag,
            });
        }
        if event.index() >= self.events {
            return Err(BuildError::UnknownEvent { event });
        }
        Ok(())
    }
}

/// The flat list of transitions produced by one transitions block.
///
/// Every [`from`](Transitions::from) call appends its pairs in order. The
/// same source may appear in several calls, and identical or conflicting
/// transitions are all kept. The first bad handle stops registration and
/// fails the whole block.
#[derive(Debug)]
pub struct Transitions {
    scope: Scope,
    transitions: Vec<Transition>,
    error: Option<BuildError>,
}

impl Transitions {
    pub(crate) fn new(scope: Scope) -> Self {
        Self {
            scope,
            transitions: Vec::new(),
            error: None,
        }
    }

    /// Declare the pairs leaving `source`.
    pub fn from<F>(&mut self, source: StateId, block: F) -> &mut Self
    where
        F: FnOnce(&mut EventToStateSet),
    {
        let mut pairs = EventToStateSet::new();
        block(&mut pairs);

        if self.error.is_none() {
            if let Err(error) = self.register(source, pairs) {
                self.error = Some(error);
            }
        }
        self
    }

    fn register(&mut self, source: StateId, pairs: EventToStateSet) -> Result<(), BuildError> {
        self.scope.check_state(source)?;
        for pair in pairs.pairs {
            self.scope.check_event(pair.event)?;
            self.scope.check_state(pair.target)?;
            debug!(
                source = %source,
                trigger = %pair.event,
                target = %pair.target,
                "transition declared"
            );
            self.transitions
                .push(Transition::new(source, pair.event, pair.target));
        }
        Ok(())
    }

    pub(crate) fn finish(self) -> Result<Vec<Transition>, BuildError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.transitions),
        }
    }
}
