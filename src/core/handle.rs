//! Handles into the collections owned by a state machine.
//!
//! Transitions and closures refer to states, events, and counters through
//! these `Copy` handles instead of references. Each handle carries the tag
//! of the machine that issued it, so a handle from one machine cannot be
//! used to wire up another.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique tag of one state machine instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MachineTag(Uuid);

impl MachineTag {
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for MachineTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

macro_rules! machine_handle {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name {
            tag: MachineTag,
            index: usize,
        }

        impl $name {
            pub(crate) fn new(tag: MachineTag, index: usize) -> Self {
                Self { tag, index }
            }

            /// Position in the owning machine's collection.
            pub fn index(&self) -> usize {
                self.index
            }

            /// Tag of the machine that issued this handle.
            pub fn tag(&self) -> MachineTag {
                self.tag
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($label, "#{}"), self.index)
            }
        }
    };
}

machine_handle!(
    /// Handle to a declared [`State`](crate::core::State).
    StateId,
    "state"
);

machine_handle!(
    /// Handle to a declared [`Event`](crate::core::Event).
    EventId,
    "event"
);

machine_handle!(
    /// Handle to a declared [`Counter`](crate::core::Counter).
    CounterId,
    "counter"
);
