//! Whole-model validation using Stillwater's `Validation`.
//!
//! Declarations may leave entities unnamed while a machine is being built.
//! Once the caller considers the machine finished, [`validate`] reports
//! every remaining problem in a single pass instead of stopping at the
//! first one.
//!
//! [`validate`]: crate::builder::StateMachine::validate
//!
//! # Example
//!
//! ```rust
//! use statekit::builder::build_state_machine;
//! use statekit::core::NamedEntity;
//! use statekit::validation::ModelViolation;
//! use stillwater::validation::Validation;
//!
//! let machine = build_state_machine(|m| {
//!     m.declare_state(|_| {})?;
//!     m.declare_event(|e| {
//!         e.name("go");
//!     })?;
//!     Ok(())
//! })
//! .unwrap();
//!
//! match machine.validate() {
//!     Validation::Failure(violations) => {
//!         assert_eq!(violations.len(), 2);
//!         assert!(violations
//!             .iter()
//!             .any(|v| matches!(v, ModelViolation::MissingInitialState)));
//!     }
//!     Validation::Success(_) => panic!("expected violations"),
//! }
//! ```

pub mod rules;
pub mod violations;

pub use violations::ModelViolation;
