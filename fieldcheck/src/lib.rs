//! Declarative form field validation.
//!
//! Each field id maps to a constraint spec (required, length bounds, pattern,
//! numeric range, equality with another field). Values are checked against
//! those specs and every check yields a plain outcome value, never an error.
//! The architecture enforces a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (registry, field validator,
//!   orchestrator). No I/O, fully testable in isolation.
//! - **[`io`]**: Rules files and value snapshots on disk.
//! - **[`presenter`]**: Turns outcomes into field states and terminal output.
//!
//! [`check`] coordinates core logic with I/O to implement the CLI.
//!
//! ```
//! use fieldcheck::core::orchestrator::validate_one;
//! use fieldcheck::core::registry::Registry;
//! use fieldcheck::core::types::{ConstraintSpec, FieldValues};
//!
//! let registry = Registry::load([
//!     ("password", ConstraintSpec::new("Password is required").with_required()),
//!     (
//!         "confirmPassword",
//!         ConstraintSpec::new("Passwords do not match")
//!             .with_required()
//!             .with_match_field("password"),
//!     ),
//! ])
//! .unwrap();
//!
//! let mut values = FieldValues::new();
//! values.insert("password".into(), "Abcdef12".into());
//! values.insert("confirmPassword".into(), "Abcdef13".into());
//!
//! let outcome = validate_one(&registry, "confirmPassword", &values);
//! assert!(!outcome.valid);
//! assert_eq!(outcome.message, "Passwords do not match");
//! ```

pub mod check;
pub mod core;
pub mod exit_codes;
pub mod forms;
pub mod io;
pub mod logging;
pub mod presenter;
#[cfg(test)]
mod test_support;
