use crate::domain::constants::{ID_FIELD, ISO_SECONDS, SUSPENSE_DATE_FIELD};
use crate::domain::models::{EntityKind, RecordId, SuspenseUpdate};
use crate::services::metadata::MetadataStore;
use crate::services::policy::PolicyError;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, SecondsFormat, SubsecRound, TimeDelta};
use std::collections::BTreeMap;

enum GoverningDate {
    Naive(NaiveDateTime),
    Zoned(DateTime<FixedOffset>),
}

const ZONED_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%:z"];
const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

fn parse_governing_date(raw: &str) -> Option<GoverningDate> {
    let s = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(GoverningDate::Zoned(dt));
    }
    for fmt in ZONED_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(GoverningDate::Zoned(dt));
        }
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(GoverningDate::Naive(dt));
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(GoverningDate::Naive)
}

/// `governing + offset` truncated to whole seconds, in ISO form.
///
/// A governing date carrying a UTC offset keeps it in the result.
pub fn suspense_date(id: &RecordId, governing: &str, offset: TimeDelta) -> Result<String, PolicyError> {
    let invalid = || PolicyError::InvalidDate {
        id: id.to_string(),
        raw: governing.to_string(),
    };
    match parse_governing_date(governing).ok_or_else(invalid)? {
        GoverningDate::Naive(dt) => dt
            .checked_add_signed(offset)
            .map(|d| d.trunc_subsecs(0).format(ISO_SECONDS).to_string())
            .ok_or_else(invalid),
        GoverningDate::Zoned(dt) => dt
            .checked_add_signed(offset)
            .map(|d| d.trunc_subsecs(0).to_rfc3339_opts(SecondsFormat::Secs, false))
            .ok_or_else(invalid),
    }
}

/// Writes `suspense_date` on every record, stopping at the first failure.
pub fn schedule_suspense_dates<S: MetadataStore + ?Sized>(
    store: &S,
    kind: EntityKind,
    governing_dates: &BTreeMap<RecordId, String>,
    offset: TimeDelta,
) -> anyhow::Result<Vec<SuspenseUpdate>> {
    let mut updates = Vec::with_capacity(governing_dates.len());
    for (id, governing) in governing_dates {
        let date = suspense_date(id, governing, offset)?;
        let body = serde_json::json!({
            ID_FIELD: id.to_value(),
            SUSPENSE_DATE_FIELD: date,
        });
        store.update(kind.collection(), id, &body)?;
        tracing::debug!(collection = kind.collection(), %id, suspense_date = %date, "suspense date set");
        updates.push(SuspenseUpdate {
            id: id.clone(),
            suspense_date: date,
        });
    }
    tracing::info!(
        collection = kind.collection(),
        updated = updates.len(),
        "suspense dates written"
    );
    Ok(updates)
}
