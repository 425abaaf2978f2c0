use crate::domain::constants::{ID_FIELD, ISO_SECONDS, LIFECYCLE_FIELDS};
use crate::domain::models::{EntityKind, RecordId};
use crate::services::metadata::MetadataStore;
use crate::services::query::Query;
use chrono::{NaiveDateTime, TimeDelta};
use serde_json::Value;
use std::collections::BTreeMap;

/// Governing dates of every `kind` record created or updated since `now - lookback`.
///
/// A record matched by both lifecycle probes keeps the value from the first
/// probe. Records without a usable governing date are left out.
pub fn changed_within<S: MetadataStore + ?Sized>(
    store: &S,
    kind: EntityKind,
    date_field: &str,
    now: NaiveDateTime,
    lookback: TimeDelta,
) -> anyhow::Result<BTreeMap<RecordId, String>> {
    let since = window_start(now, lookback)?;
    let mut objs = BTreeMap::new();
    for time_field in LIFECYCLE_FIELDS {
        let query = Query::new().changed_since(time_field, &since);
        let records = store.query(kind.collection(), &query)?;
        tracing::debug!(
            collection = kind.collection(),
            query = %query.encode(),
            count = records.len(),
            "window probe"
        );
        collate(&records, date_field, &mut objs);
    }
    tracing::info!(
        collection = kind.collection(),
        date_field,
        since = %since,
        found = objs.len(),
        "records changed within window"
    );
    Ok(objs)
}

pub fn window_start(now: NaiveDateTime, lookback: TimeDelta) -> anyhow::Result<String> {
    let start = now
        .checked_sub_signed(lookback)
        .ok_or_else(|| anyhow::anyhow!("lookback {} reaches before the calendar", lookback))?;
    Ok(start.format(ISO_SECONDS).to_string())
}

fn collate(records: &[Value], date_field: &str, objs: &mut BTreeMap<RecordId, String>) {
    for record in records {
        let Some(id) = record.get(ID_FIELD).and_then(RecordId::from_value) else {
            tracing::warn!(date_field, "skipping record without a usable `_id`");
            continue;
        };
        if objs.contains_key(&id) {
            continue;
        }
        match record.get(date_field) {
            Some(Value::String(date)) if !date.trim().is_empty() => {
                objs.insert(id, date.clone());
            }
            _ => tracing::debug!(%id, date_field, "no governing date, skipping"),
        }
    }
}
