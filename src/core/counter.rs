//! Integer registers read by guards and mutated by effects.

use super::handle::{CounterId, MachineTag};
use super::named::{EntityKind, NamedEntity, Naming};
use crate::effects::EvaluationError;
use std::cmp::Ordering;
use tracing::trace;

/// A named integer register.
///
/// The value starts at the declared initial value (zero by default). After
/// declaration it only changes through [`CounterSet::increment`], which is
/// the access effects get.
#[derive(Clone, Debug, Default)]
pub struct Counter {
    naming: Naming,
    value: i64,
}

impl Counter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the starting value. Only reachable from a counter's declaration
    /// block.
    pub fn initial_value(&mut self, value: i64) -> &mut Self {
        self.value = value;
        self
    }

    /// Current value.
    pub fn value(&self) -> i64 {
        self.value
    }

    /// Three-way comparison of the current value against `other`.
    pub fn compare(&self, other: i64) -> Ordering {
        self.value.cmp(&other)
    }

    fn increment(&mut self, delta: i64) -> Option<i64> {
        self.value = self.value.checked_add(delta)?;
        Some(self.value)
    }
}

impl NamedEntity for Counter {
    const KIND: EntityKind = EntityKind::Counter;

    fn naming(&self) -> &Naming {
        &self.naming
    }

    fn naming_mut(&mut self) -> &mut Naming {
        &mut self.naming
    }
}

impl PartialEq<i64> for Counter {
    fn eq(&self, other: &i64) -> bool {
        self.value == *other
    }
}

impl PartialOrd<i64> for Counter {
    fn partial_cmp(&self, other: &i64) -> Option<Ordering> {
        Some(self.compare(*other))
    }
}

/// The counters of one machine.
///
/// Guards receive `&CounterSet` and can only read. Effects receive
/// `&mut CounterSet` and can only increment. Both look counters up by
/// handle at evaluation time, so they always observe live values.
#[derive(Clone, Debug)]
pub struct CounterSet {
    tag: MachineTag,
    counters: Vec<Counter>,
}

impl CounterSet {
    pub(crate) fn new(tag: MachineTag) -> Self {
        Self {
            tag,
            counters: Vec::new(),
        }
    }

    pub(crate) fn insert(&mut self, counter: Counter) -> CounterId {
        self.counters.push(counter);
        CounterId::new(self.tag, self.counters.len() - 1)
    }

    pub(crate) fn contains(&self, id: CounterId) -> bool {
        id.tag() == self.tag && id.index() < self.counters.len()
    }

    /// Look up a counter.
    pub fn get(&self, id: CounterId) -> Result<&Counter, EvaluationError> {
        if !self.contains(id) {
            return Err(EvaluationError::UnknownCounter { counter: id });
        }
        Ok(&self.counters[id.index()])
    }

    /// Current value of a counter.
    pub fn value(&self, id: CounterId) -> Result<i64, EvaluationError> {
        self.get(id).map(Counter::value)
    }

    /// Three-way comparison of a counter's current value against `other`.
    pub fn compare(&self, id: CounterId, other: i64) -> Result<Ordering, EvaluationError> {
        self.get(id).map(|counter| counter.compare(other))
    }

    /// Add `delta` to a counter and return the new value.
    pub fn increment(&mut self, id: CounterId, delta: i64) -> Result<i64, EvaluationError> {
        if !self.contains(id) {
            return Err(EvaluationError::UnknownCounter { counter: id });
        }
        let counter = &mut self.counters[id.index()];
        let value = counter
            .increment(delta)
            .ok_or(EvaluationError::CounterOverflow { counter: id, delta })?;
        trace!(counter = %id, delta, value, "counter incremented");
        Ok(value)
    }

    /// Find a counter by case-insensitive name.
    pub fn find(&self, name: &str) -> Option<CounterId> {
        self.counters
            .iter()
            .position(|counter| counter.has_name(name))
            .map(|index| CounterId::new(self.tag, index))
    }

    pub fn iter(&self) -> impl Iterator<Item = (CounterId, &Counter)> {
        let tag = self.tag;
        self.counters
            .iter()
            .enumerate()
            .map(move |(index, counter)| (CounterId::new(tag, index), counter))
    }

    pub fn len(&self) -> usize {
        self.counters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }
}
