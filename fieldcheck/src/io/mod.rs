//! I/O helpers for fieldcheck commands.

pub mod rules_file;
pub mod values;
