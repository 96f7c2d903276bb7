//! Stable exit codes for fieldcheck CLI commands.

/// Command succeeded and every checked field is valid.
pub const OK: i32 = 0;
/// Command failed due to an invalid rules file, bad input, or I/O errors.
pub const ERROR: i32 = 1;
/// `fieldcheck check` found at least one invalid field.
pub const INVALID: i32 = 2;
