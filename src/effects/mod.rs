//! Guard evaluation and effect application.
//!
//! The model itself does not run: this module only provides the
//! single-step contracts an interpreter needs.
//!
//! # Key Concepts
//!
//! - **Guards** read counters through `&CounterSet` and decide whether an
//!   event may fire
//! - **Effects** increment counters through `&mut CounterSet` after a
//!   guarded transition fires
//! - **Errors** raised by either are returned to the caller untouched

mod error;
mod machine;

pub use error::EvaluationError;
