use crate::domain::models::{DataReleaseReport, Keyword, ReleaseConfig};
use crate::services::metadata::MetadataStore;
use crate::services::recorder::record_releases;
use crate::services::resolver::release_eligible;
use crate::services::scheduler::schedule_suspense_dates;
use crate::services::window::changed_within;
use chrono::{NaiveDateTime, TimeDelta};
use std::collections::HashSet;

#[derive(Debug, Clone)]
pub struct ReleaseRequest {
    pub keyword: String,
    /// Lookback used for both the change window and the due window.
    pub time_ago: TimeDelta,
    /// Offset added to the governing date.
    pub time_after: TimeDelta,
    pub exclude: Vec<String>,
}

/// Full run: schedule suspense dates for recently changed records, then
/// release every transaction whose suspense date has come due.
///
/// The keyword is validated before the store is touched.
pub fn data_release<S: MetadataStore + ?Sized>(
    store: &S,
    cfg: &ReleaseConfig,
    req: &ReleaseRequest,
    now: NaiveDateTime,
) -> anyhow::Result<DataReleaseReport> {
    let keyword: Keyword = req.keyword.parse()?;
    let kind = keyword.kind;
    tracing::info!(%keyword, %now, "data release run");

    let governing = changed_within(store, kind, &keyword.date_field, now, req.time_ago)?;
    let suspense_updates = schedule_suspense_dates(store, kind, &governing, req.time_after)?;

    let exclude: HashSet<String> = req.exclude.iter().map(|s| s.trim().to_string()).collect();
    let eligible = release_eligible(store, kind, now, req.time_ago, &exclude)?;
    let outcome = record_releases(store, &eligible, &cfg.admin_user_id)?;

    Ok(DataReleaseReport {
        keyword: keyword.to_string(),
        suspense_updates,
        eligible_transactions: eligible.into_iter().collect(),
        released: outcome.released,
        already_released: outcome.already_released,
    })
}
