//! Shared naming behavior for states, events, commands, and counters.

use super::identifier::Identifier;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// The kind of entity a name belongs to, used in errors and violations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    State,
    Event,
    Command,
    Counter,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::State => "state",
            Self::Event => "event",
            Self::Command => "command",
            Self::Counter => "counter",
        };
        f.write_str(label)
    }
}

/// A name slot that can be filled once.
///
/// A second assignment does not replace the first name. It is kept aside so
/// the declaration that caused it can be rejected once its block returns.
#[derive(Clone, Debug, Default)]
pub struct Naming {
    identifier: Option<Identifier>,
    conflict: Option<Identifier>,
}

impl Naming {
    /// A slot that is already filled.
    pub fn named(name: impl Into<Identifier>) -> Self {
        Self {
            identifier: Some(name.into()),
            conflict: None,
        }
    }

    /// Fill the slot. Later calls are recorded as a conflict.
    pub fn assign(&mut self, name: impl Into<Identifier>) {
        let name = name.into();
        match &self.identifier {
            None => self.identifier = Some(name),
            Some(first) => {
                warn!(first = %first, second = %name, "entity named more than once");
                if self.conflict.is_none() {
                    self.conflict = Some(name);
                }
            }
        }
    }

    pub fn identifier(&self) -> Option<&Identifier> {
        self.identifier.as_ref()
    }

    /// The first name and the first rejected rename, if naming happened twice.
    pub fn conflict(&self) -> Option<(&Identifier, &Identifier)> {
        match (&self.identifier, &self.conflict) {
            (Some(first), Some(second)) => Some((first, second)),
            _ => None,
        }
    }
}

/// Capability shared by every entity that carries an [`Identifier`].
///
/// Implementors only expose their [`Naming`] slot; naming, lookup, and
/// display come from the provided methods.
pub trait NamedEntity {
    /// What sort of entity this is.
    const KIND: EntityKind;

    fn naming(&self) -> &Naming;

    fn naming_mut(&mut self) -> &mut Naming;

    /// Give the entity its name. Meant to be called once, inside the
    /// entity's declaration block.
    fn name(&mut self, name: &str) -> &mut Self
    where
        Self: Sized,
    {
        self.naming_mut().assign(name);
        self
    }

    fn identifier(&self) -> Option<&Identifier> {
        self.naming().identifier()
    }

    /// The raw name, or `None` while the entity is still unnamed.
    fn name_str(&self) -> Option<&str> {
        self.identifier().map(Identifier::as_str)
    }

    fn is_named(&self) -> bool {
        self.identifier().is_some()
    }

    /// Case-insensitive name check.
    fn has_name(&self, name: &str) -> bool {
        self.identifier().is_some_and(|id| id.matches(name))
    }
}

/// Name rendering used by the display forms. Unnamed entities print `null`.
pub(crate) fn display_name(identifier: Option<&Identifier>) -> &str {
    identifier.map_or("null", Identifier::as_str)
}
