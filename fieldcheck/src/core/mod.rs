//! Deterministic, pure logic of the validation engine.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! rule sets and value snapshots and return deterministic outputs suitable
//! for tests.

pub mod invariants;
pub mod orchestrator;
pub mod registry;
pub mod types;
pub mod validator;
