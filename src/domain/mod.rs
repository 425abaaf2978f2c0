//! Shared data model layer (structs/constants only).
//!
//! ## Purpose
//! - Keep record, config and report structs in one place.
//! - Avoid cyclic imports between the workflow stages.
//! - Make JSON output schema changes explicit and reviewable.
//!
//! ## Files
//! - `models.rs` — ids, entity/relation kinds, config, report/output structs.
//! - `constants.rs` — collection names, keyword allow-list, defaults.
//!
//! ## Rule of thumb
//! Domain types should be data-only: no filesystem/network side effects.
//!
//! ## Compatibility note
//! Changes in these structs can affect `--json` outputs and the request bodies
//! sent to the metadata service.

pub mod constants;
pub mod models;
