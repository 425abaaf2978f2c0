use crate::domain::constants::{ID_FIELD, ISO_SECONDS, SUSPENSE_DATE_FIELD};
use crate::domain::models::{EntityKind, RecordId, RelationKind};
use crate::services::metadata::MetadataStore;
use crate::services::query::Query;
use crate::services::window::window_start;
use chrono::{NaiveDateTime, TimeDelta};
use serde_json::Value;
use std::collections::{BTreeSet, HashSet};

/// Transactions whose release is due: the suspense date of the record (or of
/// the owning proposal) fell between `now - lookback` and `now`.
///
/// `exclude` holds ids of the queried kind, compared by their text form.
pub fn release_eligible<S: MetadataStore + ?Sized>(
    store: &S,
    kind: EntityKind,
    now: NaiveDateTime,
    lookback: TimeDelta,
    exclude: &HashSet<String>,
) -> anyhow::Result<BTreeSet<RecordId>> {
    let query = Query::new().between(
        SUSPENSE_DATE_FIELD,
        window_start(now, lookback)?,
        now.format(ISO_SECONDS),
    );
    let due = store.query(kind.collection(), &query)?;
    let mut transactions = BTreeSet::new();
    for id in ids(&due) {
        if exclude.contains(&id.to_string()) {
            tracing::debug!(collection = kind.collection(), %id, "excluded");
            continue;
        }
        match kind {
            EntityKind::Proposals => {
                for relation in RelationKind::ALL {
                    let linked = store.query(
                        relation.collection(),
                        &Query::new().eq("proposal", &id),
                    )?;
                    transactions.extend(ids(&linked));
                }
            }
            EntityKind::Transactions => {
                transactions.insert(id);
            }
        }
    }
    tracing::info!(
        collection = kind.collection(),
        due = due.len(),
        eligible = transactions.len(),
        "release eligibility resolved"
    );
    Ok(transactions)
}

// Relation rows are keyed by the transaction they describe.
fn ids(records: &[Value]) -> impl Iterator<Item = RecordId> + '_ {
    records
        .iter()
        .filter_map(|r| r.get(ID_FIELD).and_then(RecordId::from_value))
}
