//! Serializable snapshots of a declared machine.
//!
//! A snapshot captures the structure of a machine and the current counter
//! values for inspection and testing. Guards and effects are closures and
//! are not serializable, so only their presence is recorded. A snapshot
//! cannot be turned back into a machine.

use crate::builder::StateMachine;
use crate::core::{MachineTag, NamedEntity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

pub mod error;

pub use error::{SnapshotError, SnapshotFormat};

/// Version identifier for snapshot format
pub const SNAPSHOT_VERSION: u32 = 1;

/// A state as recorded in a snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateRecord {
    pub name: Option<String>,
    pub initial: bool,
    pub commands: Vec<String>,
}

/// An event as recorded in a snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub name: Option<String>,
    pub guarded: bool,
    pub has_effect: bool,
}

/// A counter and its value when the snapshot was taken.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CounterRecord {
    pub name: Option<String>,
    pub value: i64,
}

/// A transition as positions into the snapshot's state and event lists.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord {
    pub source: usize,
    pub trigger: usize,
    pub target: usize,
    /// The `<source> -<trigger>-> <target>` display form.
    pub display: String,
}

/// Serializable view of a machine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MachineSnapshot {
    /// Snapshot format version
    pub version: u32,

    /// Unique snapshot identifier
    pub id: Uuid,

    /// When the snapshot was taken
    pub taken_at: DateTime<Utc>,

    /// Tag of the machine the snapshot was taken from
    pub machine: MachineTag,

    /// Position of the initial state in `states`
    pub initial_state: Option<usize>,

    pub states: Vec<StateRecord>,
    pub events: Vec<EventRecord>,
    pub counters: Vec<CounterRecord>,

    /// Transitions in declaration order
    pub transitions: Vec<TransitionRecord>,
}

fn owned_name<T: NamedEntity>(entity: &T) -> Option<String> {
    entity.name_str().map(str::to_string)
}

impl MachineSnapshot {
    /// Encode as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| SnapshotError::encode(SnapshotFormat::Json, e))
    }

    /// Decode from JSON, rejecting unknown format versions.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_str(json)
            .map_err(|e| SnapshotError::decode(SnapshotFormat::Json, e))?;
        snapshot.check_version()
    }

    /// Encode with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        bincode::serialize(self).map_err(|e| SnapshotError::encode(SnapshotFormat::Bincode, e))
    }

    /// Decode from bincode, rejecting unknown format versions.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let snapshot: Self = bincode::deserialize(bytes)
            .map_err(|e| SnapshotError::decode(SnapshotFormat::Bincode, e))?;
        snapshot.check_version()
    }

    fn check_version(self) -> Result<Self, SnapshotError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: self.version,
                supported: SNAPSHOT_VERSION,
            });
        }
        Ok(self)
    }
}

impl StateMachine {
    /// Capture the machine's structure and current counter values.
    pub fn snapshot(&self) -> MachineSnapshot {
        let states = self
            .states()
            .iter()
            .map(|state| StateRecord {
                name: owned_name(state),
                initial: state.is_initial(),
                commands: state.commands().iter().filter_map(owned_name).collect(),
            })
            .collect();

        let events = self
            .events()
            .iter()
            .map(|event| EventRecord {
                name: owned_name(event),
                guarded: event.has_guard(),
                has_effect: event.has_effect(),
            })
            .collect();

        let counters = self
            .counters()
            .iter()
            .map(|(_, counter)| CounterRecord {
                name: owned_name(counter),
                value: counter.value(),
            })
            .collect();

        let transitions = self
            .transitions()
            .iter()
            .map(|transition| TransitionRecord {
                source: transition.source().index(),
                trigger: transition.trigger().index(),
                target: transition.target().index(),
                display: self
                    .display_transition(transition)
                    .map(|shown| shown.to_string())
                    .unwrap_or_default(),
            })
            .collect();

        let snapshot = MachineSnapshot {
            version: SNAPSHOT_VERSION,
            id: Uuid::new_v4(),
            taken_at: Utc::now(),
            machine: self.tag(),
            initial_state: self.initial_state().map(|id| id.index()),
            states,
            events,
            counters,
            transitions,
        };
        debug!(snapshot = %snapshot.id, machine = %snapshot.machine, "snapshot taken");
        snapshot
    }
}
