//! # Chorust
//!
//! Recurring chore tracking for a small office. Chores are defined once,
//! optionally with a daily or weekly recurrence, and expanded on demand into
//! dated occurrences whose completion is tracked individually.
//!
//! The [`recurrence`] module is the engine; everything else loads, edits,
//! and presents its output.

pub mod commands;
pub mod dates;
pub mod error;
pub mod filters;
pub mod models;
pub mod recurrence;
pub mod roster;
pub mod storage;
pub mod tui;
