//! Command handler layer.
//!
//! This module owns CLI-oriented orchestration and output wiring.
//!
//! ## Files
//! - `run.rs` — the data release run.
//! - `info.rs` — keywords/config listings (no network).
//!
//! ## Principles
//! - Parse/match CLI inputs here.
//! - Delegate business logic to `services/*`.
//! - Keep behavior and output schema stable.

pub mod info;
pub mod run;

pub use info::handle_info_commands;
pub use run::handle_run_command;
