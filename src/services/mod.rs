//! Service layer containing business logic and side-effect helpers.
//!
//! ## Service map
//! - `metadata.rs` — `MetadataStore` contract + blocking HTTP client.
//! - `query.rs` — typed query-string filters (exact, between, changed-since).
//! - `window.rs` — records changed within the lookback window.
//! - `scheduler.rs` — suspense-date computation and write-back.
//! - `resolver.rs` — due records → releasable transactions.
//! - `recorder.rs` — idempotent release-record creation.
//! - `release.rs` — the full `data_release` run.
//! - `policy.rs` — keyword allow-list and duration literals.
//! - `config.rs` — config file + environment overrides.
//! - `output.rs` — JSON/text output helpers.
//!
//! ## Conventions
//! - Stages are generic over `MetadataStore`; only `main` builds the HTTP client.
//! - Every stage stops at the first failed write.
//! - Keep command handlers thin; delegate to services.

pub mod config;
pub mod metadata;
pub mod output;
pub mod policy;
pub mod query;
pub mod recorder;
pub mod release;
pub mod resolver;
pub mod scheduler;
pub mod window;
